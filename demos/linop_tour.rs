// Run with RUST_LOG=linop=debug to see construction records.
use faer::Mat;
use linop::{CallbackOperator, NormalEquationsOperator, OperatorOptions, WrappedMatrixOperator};
use std::sync::Arc;

fn main() -> Result<(), linop::LinOpError> {
    env_logger::init();

    // J = [[1, 2, 0], [0, 3, 4]]
    let rows = [[1.0, 2.0, 0.0], [0.0, 3.0, 4.0]];
    let j = Arc::new(Mat::from_fn(2, 3, |i, k| rows[i][k]));
    let e1 = vec![1.0; 2];
    let e2 = vec![1.0; 3];

    println!("Wrapped matrix operator:");
    let op = WrappedMatrixOperator::shared(Arc::clone(&j))
        .with_options(OperatorOptions::new().with_logging())
        .build()?;
    let op_t = op.transpose()?;
    println!("op.shape = {:?}, op.T.shape = {:?}", op.shape(), op_t.shape());
    println!("op * e2 = {:?}", (&op * &e2)?);
    println!("op.T * e1 = {:?}", (&op_t * &e1)?);
    println!("op.T.T * e2 = {:?}", op_t.transpose()?.apply(&e2)?);
    println!("op.T.T is op: {}", op_t.transpose()?.ptr_eq(&op));

    println!("\nCallback operator:");
    let (jf, jt) = (Arc::clone(&j), Arc::clone(&j));
    let op = CallbackOperator::new(3, 2, move |v: &[f64]| linop::MatrixLike::mul(&*jf, v).expect("J * v"))
        .with_transpose(move |u: &[f64]| linop::MatrixLike::rmul(&*jt, u).expect("Jᵗ * u"))
        .with_options(OperatorOptions::new().with_logging())
        .build()?;
    println!("op(e2) = {:?}, op.T(e1) = {:?}", op.call(&e2)?, op.transpose()?.call(&e1)?);
    println!("op.T.T is op: {}", op.transpose()?.transpose()?.ptr_eq(&op));

    println!("\nNormal-equations operators:");
    let ata = NormalEquationsOperator::new(op.clone())
        .with_options(OperatorOptions::new().with_logging())
        .build()?;
    println!("op2 * e2 = {:?}", ata.apply(&e2)?);
    println!("op.T * (op * e2) = {:?}", op.transpose()?.apply(&op.apply(&e2)?)?);
    let aat = NormalEquationsOperator::new(op.clone())
        .transposed()
        .with_options(OperatorOptions::new().with_logging())
        .build()?;
    println!("op3 * e1 = {:?}", aat.apply(&e1)?);
    println!("op * (op.T * e1) = {:?}", op.apply(&op.transpose()?.apply(&e1)?)?);
    Ok(())
}
