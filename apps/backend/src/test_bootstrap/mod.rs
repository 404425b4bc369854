#![cfg(test)]

//! Unit-test logging hook; the subscriber itself lives in
//! `backend_test_support::test_logging` so unit and integration tests share it.

pub fn init_logging() {
    backend_test_support::test_logging::init();
}
