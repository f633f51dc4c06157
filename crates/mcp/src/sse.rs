#[cfg(test)]
use std::collections::VecDeque;

use bytes::Bytes;
use reqwest::Response;

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Error {
    Transport,
    InvalidPayload,
}

/// An adapter for streaming byte chunks.
pub(crate) enum ByteSource {
    Response(Response),
    #[cfg(test)]
    VecDeque(VecDeque<Bytes>),
}

impl ByteSource {
    pub fn from_response(response: Response) -> Self {
        ByteSource::Response(response)
    }

    #[cfg(test)]
    pub fn from_vec_deque(vec: VecDeque<Bytes>) -> Self {
        ByteSource::VecDeque(vec)
    }

    #[inline]
    pub async fn next_chunk(&mut self) -> Result<Option<Bytes>, Error> {
        match self {
            ByteSource::Response(response) => {
                let Ok(chunk) = response.chunk().await else {
                    return Err(Error::Transport);
                };
                Ok(chunk)
            }
            #[cfg(test)]
            ByteSource::VecDeque(vec) => {
                let chunk = vec.pop_front();
                Ok(chunk)
            }
        }
    }
}

/// A single server-sent event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Event {
    pub name: Option<String>,
    pub data: String,
}

/// A type for reading server-sent events from a chunk stream.
pub(crate) struct EventStream {
    buf: String,
    source: ByteSource,
}

impl EventStream {
    #[inline]
    pub fn new(source: ByteSource) -> Self {
        Self {
            buf: String::new(),
            source,
        }
    }

    pub async fn next_event(&mut self) -> Result<Option<Event>, Error> {
        loop {
            // Read more data from the stream first.
            let mut has_more_data = false;
            if let Some(bytes) = self.source.next_chunk().await? {
                let Ok(s) = str::from_utf8(&bytes) else {
                    return Err(Error::InvalidPayload);
                };
                self.buf.push_str(s);
                has_more_data = true;
            }

            // There are data in the buffer, try to parse an event. If the data
            // is not enough to parse an event, we need to read more.
            if let Some(event) = self.try_parse_event() {
                return Ok(Some(event));
            }

            // Abort if no more data available.
            if !has_more_data {
                return Ok(None);
            }
        }
    }

    fn try_parse_event(&mut self) -> Option<Event> {
        // For `end-of-line`, we only handle line feed.
        //
        // event         = *( comment / field ) end-of-line
        // field         = 1*name-char [ colon [ space ] *any-char ] end-of-line
        // end-of-line   = ( cr lf / cr / lf )
        loop {
            let eol_idx = self.buf.find("\n\n")?;
            let block = &self.buf[0..eol_idx];

            let mut event = Event::default();
            let mut has_data = false;
            for line in block.lines() {
                // Lines starting with a colon are comments.
                if line.starts_with(':') {
                    continue;
                }
                let (field, value) = match line.split_once(':') {
                    Some((field, value)) => {
                        (field, value.strip_prefix(' ').unwrap_or(value))
                    }
                    None => (line, ""),
                };
                match field {
                    "event" => event.name = Some(value.to_owned()),
                    "data" => {
                        // Multiple data fields are joined with a line feed.
                        if has_data {
                            event.data.push('\n');
                        }
                        event.data.push_str(value);
                        has_data = true;
                    }
                    // Other fields (`id`, `retry`, ...) are not used.
                    _ => {}
                }
            }

            // Consume the bytes from the buffer.
            self.buf.drain(0..eol_idx + 2);

            // A block that carried no event fields (e.g. keep-alive
            // comments) dispatches nothing.
            if event.name.is_some() || has_data {
                return Some(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    #[tokio::test]
    async fn test_normal_events() {
        let source = ByteSource::from_vec_deque(
            vec![
                Bytes::from_static(b"event: endpoint\ndata: /messages\n\n"),
                Bytes::from_static(b"data: hello\n\n"),
            ]
            .into(),
        );
        let mut stream = EventStream::new(source);
        assert_eq!(
            stream.next_event().await.unwrap().unwrap(),
            Event {
                name: Some("endpoint".to_owned()),
                data: "/messages".to_owned(),
            }
        );
        assert_eq!(
            stream.next_event().await.unwrap().unwrap(),
            Event {
                name: None,
                data: "hello".to_owned(),
            }
        );
        assert_eq!(stream.next_event().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_quirk_streaming() {
        let source = ByteSource::from_vec_deque(
            vec![
                Bytes::from_static(b"event: mess"),
                Bytes::from_static(b"age\ndata:"),
                Bytes::from_static(b" hello\n"),
                Bytes::from_static(b"\n"),
            ]
            .into(),
        );
        let mut stream = EventStream::new(source);
        assert_eq!(
            stream.next_event().await.unwrap().unwrap(),
            Event {
                name: Some("message".to_owned()),
                data: "hello".to_owned(),
            }
        );
        assert_eq!(stream.next_event().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_multi_line_data() {
        let source = ByteSource::from_vec_deque(
            vec![Bytes::from_static(b"data: hello\ndata: bye\n\n")].into(),
        );
        let mut stream = EventStream::new(source);
        assert_eq!(
            stream.next_event().await.unwrap().unwrap().data,
            "hello\nbye"
        );
    }

    #[tokio::test]
    async fn test_comments_are_skipped() {
        let source = ByteSource::from_vec_deque(
            vec![
                Bytes::from_static(b": keep-alive\n\n"),
                Bytes::from_static(b": ping\ndata: hello\n\n"),
            ]
            .into(),
        );
        let mut stream = EventStream::new(source);
        assert_eq!(stream.next_event().await.unwrap().unwrap().data, "hello");
        assert_eq!(stream.next_event().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_incomplete_event() {
        let source = ByteSource::from_vec_deque(
            vec![Bytes::from_static(b"data: hello\n")].into(),
        );
        let mut stream = EventStream::new(source);
        assert_eq!(stream.next_event().await.unwrap(), None);
    }
}
