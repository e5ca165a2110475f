pub mod together_client;

pub use together_client::TogetherLLMClient;
