mod gradient;
mod gradient_descent;
mod optimizer;

pub use gradient::linear_gradient;
pub use gradient_descent::GradientDescent;
pub use optimizer::Optimizer;
