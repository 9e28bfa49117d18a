pub mod classifier_service;
pub mod encoding_service;
pub mod llm_service;
pub mod response_service;
