//! Exclusive bus access for multi-frame sequences
//!
//! A single frame is always one [`SpiDevice`](embedded_hal::spi::SpiDevice)
//! transaction, so the bus is held for its duration by the device
//! implementation. Reads and software control triggers consist of two frames
//! each with its own chip select assertion. Those sequences run inside
//! [`BusLock::exclusive`] so no other user of the bus can slip a frame in
//! between.

/// Scoped lock held for the whole of a multi-frame sequence.
///
/// The lock is released when `f` returns, whether it succeeded or not.
/// Implement this for an RTOS mutex when devices sharing the bus are driven
/// from several tasks.
pub trait BusLock {
    /// Run `f` while holding exclusive access to the bus
    fn exclusive<R>(&mut self, f: impl FnOnce() -> R) -> R;
}

/// No locking at all.
///
/// Sufficient when every device on the bus is driven from the same execution
/// context, e.g. with an `embedded-hal-bus` `ExclusiveDevice` or
/// `RefCellDevice`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLock;

impl BusLock for NoLock {
    fn exclusive<R>(&mut self, f: impl FnOnce() -> R) -> R {
        f()
    }
}

/// Runs sequences inside a critical section.
///
/// Needed when the bus is also used from interrupt handlers, e.g. through an
/// `embedded-hal-bus` `CriticalSectionDevice`. Nesting with the device's own
/// critical sections is fine.
#[cfg(feature = "critical-section")]
#[derive(Debug, Default, Clone, Copy)]
pub struct CriticalSectionLock;

#[cfg(feature = "critical-section")]
impl BusLock for CriticalSectionLock {
    fn exclusive<R>(&mut self, f: impl FnOnce() -> R) -> R {
        critical_section::with(|_| f())
    }
}
