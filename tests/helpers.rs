// Shared test helpers: canned transport responses and a recording transport.
//
// This module is pulled into several test files with `mod helpers;`.
#![allow(dead_code)]

use std::sync::Mutex;

use httpchain::{ClientError, Config, PreparedRequest, Request, Transport};

/// A 303 hop followed by a 200 with a body, LF line endings.
pub const HTTP_MESSAGE_ONE_REDIRECT: &str = "HTTP/1.1 303 See other
Date: Tue, 17 Feb 2015 20:20:48 GMT
Server: Apache
X-Powered-By: PHP/5.5.21
Set-Cookie: 5e8627afafd16a920dac4dbb644715a5=ue1gprimq6rb5r4qsb8sk28jb2; path=/; HttpOnly
Location: http://care4all.dk/da/
Connection: close
Content-Type: text/html; charset=utf-8
Set-Cookie: SERVERID=; path=/

HTTP/1.1 200 OK
Date: Tue, 17 Feb 2015 20:20:48 GMT
Server: Apache
X-Powered-By: PHP/5.5.21
Set-Cookie: 76726d50abd3edd601ecfbc19fe61c87=da-DK; path=/
Set-Cookie: 76726d50abd3edd601ecfbc19fe61c87=da-DK
P3P: CP=\"NOI ADM DEV PSAi COM NAV OUR OTRo STP IND DEM\"
Expires: Mon, 1 Jan 2001 00:00:00 GMT
Last-Modified: Tue, 17 Feb 2015 20:20:48 GMT
Cache-Control: no-store, no-cache, must-revalidate, post-check=0, pre-check=0
Pragma: no-cache
Connection: close
Content-Type: text/html; charset=utf-8
Set-Cookie: SERVERID=; path=/

<!doctype html>

<html lang=\"da\">
<head>
    <meta charset=\"utf-8\">
    <title>Onlinevind</title>
</head>
<body>
    <div id=\"container\"></div>
</body>
</html>";

/// A single 200 response with a body, CRLF line endings.
pub const HTTP_MESSAGE_NO_REDIRECT: &str = "HTTP/1.1 200 OK\r\n\
Server: nginx/1.6.2\r\n\
Date: Mon, 16 Feb 2015 13:07:27 GMT\r\n\
Content-Type: text/html\r\n\
Content-Length: 15\r\n\
Connection: keep-alive\r\n\
ETag: \"547a49bf-17b\"\r\n\
Accept-Ranges: bytes\r\n\
\r\n\
<!doctype html>";

/// Transport that records every prepared request and replies with a canned buffer.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    reply: String,
    calls: Mutex<Vec<PreparedRequest>>,
}

impl RecordingTransport {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<PreparedRequest> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock poisoned").len()
    }
}

impl Transport for RecordingTransport {
    async fn execute(&self, request: &PreparedRequest) -> Result<String, ClientError> {
        self.calls
            .lock()
            .expect("calls lock poisoned")
            .push(request.clone());
        Ok(self.reply.clone())
    }
}

/// Issuer over a recording transport with default configuration.
pub fn recording_request(reply: &str) -> Request<RecordingTransport> {
    Request::with_transport(&Config::default(), RecordingTransport::replying(reply))
}
