//! Domain value types.
//!
//! Newtypes that validate on construction, so anything holding one can rely
//! on it being well formed.

pub mod email;
pub mod id;
pub mod phone;
pub mod price;
pub mod rating;
pub mod size;

pub use email::{Email, EmailError};
pub use id::*;
pub use phone::{PhoneNumber, PhoneNumberError};
pub use price::{CURRENCY_LABEL, Price, PriceError};
pub use rating::{Rating, RatingError, RatingSummary};
pub use size::*;
