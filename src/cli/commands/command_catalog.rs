// Commands module.
// One file per mode of the binary.

pub mod authorize;

pub mod notify;
