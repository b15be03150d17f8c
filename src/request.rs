//! Incoming HTTP request type.

use crate::method::Method;

/// An incoming HTTP request, parsed from the raw bytes read off the socket.
///
/// Headers keep first-seen order; a repeated name overwrites the earlier
/// value in place. Body lines are the non-empty lines after the blank line.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Request {
    pub(crate) method: String,
    pub(crate) path: String,
    pub(crate) version: String,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Vec<String>,
}

impl Request {
    pub(crate) fn new(method: String, path: String, version: String) -> Self {
        Self { method, path, version, headers: Vec::new(), body: Vec::new() }
    }

    pub fn method(&self) -> &str { &self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn version(&self) -> &str { &self.version }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &[String] { &self.body }

    /// The method as a typed [`Method`], or `None` when the site does not know it.
    pub fn method_kind(&self) -> Option<Method> {
        self.method.parse().ok()
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Sets a header, replacing any earlier value stored under the same name.
    pub(crate) fn set_header(&mut self, name: &str, value: &str) {
        match self.headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
            Some(slot) => slot.1 = value.to_owned(),
            None => self.headers.push((name.to_owned(), value.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_header_overwrites_earlier_in_place() {
        let mut req = Request::new("GET".into(), "/".into(), "HTTP/1.1".into());
        req.set_header("Cookie", "a");
        req.set_header("Host", "x");
        req.set_header("cookie", "b");
        assert_eq!(req.header("COOKIE"), Some("b"));
        assert_eq!(req.headers()[0].0, "Cookie");
        assert_eq!(req.headers().len(), 2);
    }

    #[test]
    fn unknown_method_has_no_kind() {
        let req = Request::new("PATCH".into(), "/".into(), "HTTP/1.1".into());
        assert_eq!(req.method_kind(), None);
    }
}
