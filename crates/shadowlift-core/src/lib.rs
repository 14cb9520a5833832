pub mod buffer;
pub mod codec;
pub mod consts;
pub mod error;
pub mod pipeline;
pub mod tone;
pub mod worker;
