//! Per-page request lifecycle for single-shot inference forms.
//!
//! DESIGN
//! ======
//! Each page owns one `RwSignal<RequestState<T>>`. [`RequestState::begin`]
//! refuses to start while a request is in flight, which is how submit
//! buttons stay single-flight without tracking a separate busy flag. A
//! failed request leaves the previous result on screen.

#[cfg(test)]
#[path = "request_test.rs"]
mod request_test;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestState<T> {
    pub loading: bool,
    pub result: Option<T>,
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        Self { loading: false, result: None }
    }
}

impl<T> RequestState<T> {
    /// Mark a request in flight. Returns `false` when one already is.
    pub fn begin(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        true
    }

    pub fn succeed(&mut self, value: T) {
        self.loading = false;
        self.result = Some(value);
    }

    pub fn fail(&mut self) {
        self.loading = false;
    }

    /// Clear the result so the form is shown again.
    pub fn reset(&mut self) {
        self.loading = false;
        self.result = None;
    }

    #[must_use]
    pub fn has_result(&self) -> bool {
        self.result.is_some()
    }
}
