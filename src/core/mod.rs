pub mod aps;
pub mod document_parser;
pub mod errors;
pub mod guidance_catalog;
pub mod models;
pub mod ocr;
pub mod pdf;
pub mod profile_store;
pub mod recommendation_engine;
pub mod score_extractor;
pub mod service;
pub mod settings_store;
pub mod subject_catalog;
pub mod summary;
