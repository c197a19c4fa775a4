//! Word-by-word answer streaming.

use std::pin::Pin;
use std::time::Duration;

use async_stream::stream;
use futures::Stream;

/// A lazy, finite sequence of answer chunks.
///
/// Each chunk is one word of the composed answer with a single trailing
/// space. The stream holds no external resources, so a consumer may stop
/// draining it at any point.
pub type AnswerStream = Pin<Box<dyn Stream<Item = String> + Send>>;

/// Split `answer` on whitespace and emit each word as its own chunk.
///
/// `delay` paces the emission after each chunk; pass `Duration::ZERO` to
/// disable pacing entirely (the timer is never touched), which makes the
/// stream suitable for tests and batch consumers. Concatenating all
/// chunks reproduces the answer up to whitespace collapsing.
pub fn stream_words(answer: String, delay: Duration) -> AnswerStream {
    Box::pin(stream! {
        for word in answer.split_whitespace() {
            yield format!("{word} ");
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    })
}
