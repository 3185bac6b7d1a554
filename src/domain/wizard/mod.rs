//! Review wizard: state, events, the pure reducer, and the session timer.

mod event;
mod reducer;
mod state;
mod timer;

pub use event::{FieldEdit, WizardEvent};
pub use reducer::reduce;
pub use state::{SaveError, WizardPosition, WizardState};
pub use timer::SessionTimer;
