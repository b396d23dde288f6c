//! Activation handler trait.

use crate::dwell::ActivationEvent;
use crate::error::HandlerError;

/// Consumer of key activations.
///
/// Called synchronously from the engine for every activation, so
/// implementations must not block. Errors are logged by the engine and
/// otherwise ignored: a failing handler never changes dwell state.
///
/// # Example
///
/// ```
/// use dwellpad::dwell::ActivationEvent;
/// use dwellpad::error::HandlerError;
/// use dwellpad::traits::ActivationHandler;
///
/// #[derive(Default)]
/// struct Counter(usize);
///
/// impl ActivationHandler for Counter {
///     fn on_activate(&mut self, _event: &ActivationEvent) -> Result<(), HandlerError> {
///         self.0 += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait ActivationHandler {
    /// Apply one activation.
    fn on_activate(&mut self, event: &ActivationEvent) -> Result<(), HandlerError>;
}

impl<H: ActivationHandler + ?Sized> ActivationHandler for Box<H> {
    fn on_activate(&mut self, event: &ActivationEvent) -> Result<(), HandlerError> {
        (**self).on_activate(event)
    }
}

impl<H: ActivationHandler + ?Sized> ActivationHandler for &mut H {
    fn on_activate(&mut self, event: &ActivationEvent) -> Result<(), HandlerError> {
        (**self).on_activate(event)
    }
}
