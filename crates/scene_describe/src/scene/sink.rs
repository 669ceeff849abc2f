//! Sink trait consumed by the description pipelines

use crate::describe::coerce::AttributeValue;

/// Receives locations and typed attributes produced by a description
///
/// Implementations are free to create, amend, or record; the pipelines make
/// no assumption about which.
pub trait Sink {
    /// Declare a location
    fn create_location(&mut self, path: &str);

    /// Set `name` on the location at `path`
    fn set_attribute(&mut self, path: &str, name: &str, value: AttributeValue);
}
