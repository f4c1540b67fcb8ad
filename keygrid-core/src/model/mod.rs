pub(crate) mod grid;
pub(crate) mod input;
pub(crate) mod key;
pub(crate) mod palette;
