mod document_tests;
mod query_tests;
