//! Maud HTML template components for the web UI.
//!
//! - `layout`: Base page layout and navigation
//! - `alert`: Flash message alerts
//! - `button`: Button and link-button components
//! - `card`: Post cards and the empty-list placeholder
//! - `form`: Form elements and input components

pub mod alert;
pub mod button;
pub mod card;
pub mod form;
pub mod layout;

pub use alert::{Alert, AlertVariant, FlashList};
pub use button::{Button, ButtonVariant};
pub use card::{EmptyState, PostCard};
pub use form::{Form, FormGroup, Input, Select, SelectOption, TextArea};
pub use layout::BaseLayout;
