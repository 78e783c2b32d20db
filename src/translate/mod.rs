pub mod codegen;
pub mod emit;

pub use codegen::Codegen;
pub use emit::Emitter;
