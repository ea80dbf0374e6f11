pub mod analog;
pub mod record;
