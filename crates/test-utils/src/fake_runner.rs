use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use mvnprep::errors::Result;
use mvnprep::exec::{ProcessRequest, ProcessResult, ProcessRunner};

use crate::EventLog;

/// A fake runner that:
/// - records every request it receives
/// - answers with the first scripted result whose token appears in the args
/// - falls back to a successful, empty result.
#[derive(Clone, Default)]
pub struct FakeProcessRunner {
    rules: Arc<Mutex<Vec<(String, ProcessResult)>>>,
    requests: Arc<Mutex<Vec<ProcessRequest>>>,
    events: EventLog,
}

impl FakeProcessRunner {
    pub fn new(events: EventLog) -> Self {
        Self {
            events,
            ..Self::default()
        }
    }

    /// Answer requests containing the argument `token` with `result`.
    pub fn respond(&self, token: &str, result: ProcessResult) -> &Self {
        self.rules
            .lock()
            .unwrap()
            .push((token.to_string(), result));
        self
    }

    pub fn requests(&self) -> Vec<ProcessRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Argument strings of every request, in order.
    pub fn invocations(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.spec.command, r.spec.arg_string()))
            .collect()
    }
}

impl ProcessRunner for FakeProcessRunner {
    fn run(
        &self,
        request: ProcessRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessResult>> + Send + '_>> {
        let result = self
            .rules
            .lock()
            .unwrap()
            .iter()
            .find(|(token, _)| request.spec.args.iter().any(|a| a == token))
            .map(|(_, result)| result.clone())
            .unwrap_or_else(|| ProcessResult::exited(0, "", ""));

        self.events
            .push(format!("run {}", request.spec.args.first().cloned().unwrap_or_default()));
        self.requests.lock().unwrap().push(request);

        Box::pin(async move { Ok(result) })
    }
}
