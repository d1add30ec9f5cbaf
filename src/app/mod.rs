// Application layer: presentation loops that drive the core.

pub mod console;
