pub mod reconciler;
pub mod validator;

pub use reconciler::IReconciler;
pub use validator::IIntegrityValidator;
