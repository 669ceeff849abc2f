//! Cross-backend tests
