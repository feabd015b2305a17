//! Rate-limit-aware HTTP GET
//!
//! Both upstream services throttle with `429 Too Many Requests` and a
//! `Retry-After` header. The request is retried until it yields a
//! non-429 response; any other non-success status is an error. Waiting
//! goes through a [`Sleeper`] so tests never actually sleep.

use std::time::Duration;

use log::warn;
use reqwest::blocking::{Client, Response};
use reqwest::header::RETRY_AFTER;
use reqwest::StatusCode;

use crate::error::PriorsError;

/// Wait used when a 429 response carries no usable Retry-After header
const DEFAULT_BACKOFF: Duration = Duration::from_secs(1);

/// Injectable clock for rate-limit backoff
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Production sleeper backed by the OS clock
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

impl<S: Sleeper + ?Sized> Sleeper for &S {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration);
    }
}

fn retry_after(response: &Response) -> Duration {
    response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_BACKOFF)
}

/// GET `url`, waiting out any number of 429 responses.
///
/// Returns the first non-429 response if it is a success; maps other
/// statuses to [`PriorsError::ServiceStatus`] and transport failures to
/// [`PriorsError::Http`].
pub fn get_with_retry<S: Sleeper>(
    client: &Client,
    url: &str,
    sleeper: &S,
) -> Result<Response, PriorsError> {
    loop {
        let response = client.get(url).send().map_err(|e| PriorsError::Http {
            url: url.to_string(),
            msg: e.to_string(),
        })?;
        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            let wait = retry_after(&response);
            warn!("rate limited by {url}, retrying in {}s", wait.as_secs());
            sleeper.sleep(wait);
            continue;
        }
        if !response.status().is_success() {
            return Err(PriorsError::ServiceStatus {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }
        return Ok(response);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records requested waits instead of sleeping
    pub(crate) struct RecordingSleeper {
        pub waits: RefCell<Vec<Duration>>,
    }

    impl RecordingSleeper {
        pub fn new() -> Self {
            Self {
                waits: RefCell::new(Vec::new()),
            }
        }
    }

    impl Sleeper for RecordingSleeper {
        fn sleep(&self, duration: Duration) {
            self.waits.borrow_mut().push(duration);
        }
    }

    #[test]
    fn test_recording_sleeper_accumulates() {
        let sleeper = RecordingSleeper::new();
        sleeper.sleep(Duration::from_secs(2));
        (&sleeper).sleep(Duration::from_secs(3));
        assert_eq!(
            *sleeper.waits.borrow(),
            vec![Duration::from_secs(2), Duration::from_secs(3)]
        );
    }

    use std::io::{Read, Write};
    use std::net::TcpListener;

    /// Serve the given raw HTTP responses on a local port, one
    /// connection each
    fn serve(responses: &'static [&'static str]) -> (String, std::thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/seq", listener.local_addr().unwrap());
        let handle = std::thread::spawn(move || {
            for response in responses {
                let (mut stream, _) = listener.accept().unwrap();
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf);
                stream.write_all(response.as_bytes()).unwrap();
            }
        });
        (url, handle)
    }

    #[test]
    fn test_rate_limit_waits_server_delay_then_retries() {
        let (url, server) = serve(&[
            "HTTP/1.1 429 Too Many Requests\r\nRetry-After: 7\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            "HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok",
        ]);
        let sleeper = RecordingSleeper::new();
        let response = get_with_retry(&Client::new(), &url, &sleeper).unwrap();
        assert_eq!(response.text().unwrap(), "ok");
        assert_eq!(*sleeper.waits.borrow(), vec![Duration::from_secs(7)]);
        server.join().unwrap();
    }

    #[test]
    fn test_rate_limit_without_header_uses_default_backoff() {
        let (url, server) = serve(&[
            "HTTP/1.1 429 Too Many Requests\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            "HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok",
        ]);
        let sleeper = RecordingSleeper::new();
        get_with_retry(&Client::new(), &url, &sleeper).unwrap();
        assert_eq!(*sleeper.waits.borrow(), vec![DEFAULT_BACKOFF]);
        server.join().unwrap();
    }

    #[test]
    fn test_other_status_is_an_error_without_retry() {
        let (url, server) = serve(&[
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        ]);
        let sleeper = RecordingSleeper::new();
        let err = get_with_retry(&Client::new(), &url, &sleeper).unwrap_err();
        assert!(matches!(err, PriorsError::ServiceStatus { status: 500, .. }));
        assert!(sleeper.waits.borrow().is_empty());
        server.join().unwrap();
    }
}
