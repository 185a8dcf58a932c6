mod email_address;
mod html;
mod submission;
mod validation;

pub use email_address::*;
pub use html::*;
pub use submission::*;
pub use validation::*;
