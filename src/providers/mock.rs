/*!
 * Mock provider implementation for testing.
 *
 * Page requests (those carrying an image) and term requests (text only) are
 * answered separately so a whole batch can be scripted:
 * - `MockProvider::working()` - every page succeeds, no new terms
 * - `MockProvider::failing_on_page(i)` - page `i` (0-based) fails
 * - `MockProvider::failing()` - every request fails
 *
 * Every request is recorded for later inspection.
 */

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::errors::ProviderError;
use crate::providers::{GenerationRequest, Provider};

/// Behavior mode for page requests
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Fails on the page request with this 0-based index
    FailOnPage { index: usize },
    /// Every request fails, term requests included
    Failing,
}

/// Mock provider for testing pipeline behavior
#[derive(Debug, Clone)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of page requests answered so far
    page_count: Arc<AtomicUsize>,
    /// Scripted replies to term requests, `{}` once exhausted
    term_responses: Arc<Mutex<VecDeque<String>>>,
    /// Whether term requests error out
    fail_terms: bool,
    /// Every request received, in order
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
    /// Custom page response generator (optional)
    page_response: Option<fn(usize, &GenerationRequest) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            page_count: Arc::new(AtomicUsize::new(0)),
            term_responses: Arc::new(Mutex::new(VecDeque::new())),
            fail_terms: matches!(behavior, MockBehavior::Failing),
            requests: Arc::new(Mutex::new(Vec::new())),
            page_response: None,
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock that fails on one page request
    pub fn failing_on_page(index: usize) -> Self {
        Self::new(MockBehavior::FailOnPage { index })
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Queue replies for successive term requests
    pub fn with_term_responses<I, S>(self, responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        lock(&self.term_responses).extend(responses.into_iter().map(Into::into));
        self
    }

    /// Make term requests error out while pages keep working
    pub fn with_failing_terms(mut self) -> Self {
        self.fail_terms = true;
        self
    }

    /// Set a custom page response generator
    pub fn with_page_response(mut self, generator: fn(usize, &GenerationRequest) -> String) -> Self {
        self.page_response = Some(generator);
        self
    }

    /// Default text returned for page `index`
    pub fn default_page_text(index: usize, request: &GenerationRequest) -> String {
        let file_name = request
            .image
            .as_ref()
            .map(|i| i.file_name.as_str())
            .unwrap_or("?");
        format!("[PAGE {}] {}", index, file_name)
    }

    /// All requests received so far
    pub fn requests(&self) -> Vec<GenerationRequest> {
        lock(&self.requests).clone()
    }

    /// Requests that carried a page image
    pub fn page_requests(&self) -> Vec<GenerationRequest> {
        self.requests().into_iter().filter(|r| r.image.is_some()).collect()
    }

    /// Text-only requests
    pub fn term_requests(&self) -> Vec<GenerationRequest> {
        self.requests().into_iter().filter(|r| r.image.is_none()).collect()
    }
}

// A panicking test must not poison the other assertions.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, request: GenerationRequest) -> Result<String, ProviderError> {
        lock(&self.requests).push(request.clone());

        if request.image.is_none() {
            if self.fail_terms {
                return Err(ProviderError::ApiError {
                    status_code: 500,
                    message: "Simulated term extraction failure".to_string(),
                });
            }
            return Ok(lock(&self.term_responses)
                .pop_front()
                .unwrap_or_else(|| "{}".to_string()));
        }

        let index = self.page_count.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated provider failure".to_string(),
            }),
            MockBehavior::FailOnPage { index: failing } if failing == index => {
                Err(ProviderError::RateLimitExceeded(format!(
                    "Simulated quota exhaustion on page {}",
                    index
                )))
            }
            _ => {
                let generator = self.page_response.unwrap_or(Self::default_page_text);
                Ok(generator(index, &request))
            }
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
