mod errors;
mod machine;
mod timer;
mod types;

pub use errors::CallbackError;
pub use machine::{CallbackEnv, CallbackReconciler};
pub use timer::RedirectTimer;
pub use types::{
    CallbackOutcome, CallbackRequest, CallbackState, ERROR_REDIRECT_DELAY, ExchangedSession,
    RedirectTarget, SUCCESS_REDIRECT_DELAY,
};
