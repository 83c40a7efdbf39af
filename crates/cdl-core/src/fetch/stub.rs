//! In-memory [`Fetch`] for unit tests.

use super::{Fetch, FetchError, RequestKind};
use std::cell::RefCell;
use std::collections::HashMap;

enum Canned {
    Body(Vec<u8>),
    Status(u32),
}

/// Serves canned bodies by exact URL; unknown URLs answer 404. Records every request.
#[derive(Default)]
pub(crate) struct StubFetch {
    routes: HashMap<String, Canned>,
    requests: RefCell<Vec<String>>,
}

impl StubFetch {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn json(self, url: &str, body: &str) -> Self {
        self.bytes(url, body.as_bytes())
    }

    pub(crate) fn bytes(mut self, url: &str, body: &[u8]) -> Self {
        self.routes.insert(url.to_string(), Canned::Body(body.to_vec()));
        self
    }

    pub(crate) fn status(mut self, url: &str, code: u32) -> Self {
        self.routes.insert(url.to_string(), Canned::Status(code));
        self
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Fetch for StubFetch {
    fn get(&self, url: &str, _kind: RequestKind) -> Result<Vec<u8>, FetchError> {
        self.requests.borrow_mut().push(url.to_string());
        match self.routes.get(url) {
            Some(Canned::Body(body)) => Ok(body.clone()),
            Some(Canned::Status(code)) => Err(FetchError::Http(*code)),
            None => Err(FetchError::Http(404)),
        }
    }
}
