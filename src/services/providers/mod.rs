pub mod image_host;
pub mod mymemory;
pub mod openai;
pub mod unconfigured;

pub use image_host::HttpImageHost;
pub use mymemory::MyMemoryTranslator;
pub use openai::OpenAiProvider;
pub use unconfigured::Unconfigured;
