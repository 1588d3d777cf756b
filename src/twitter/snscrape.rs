use std::process::Stdio;

use async_trait::async_trait;
use futures::StreamExt;
use log::{debug, info, warn};
use tokio::{
    io::{AsyncBufReadExt, BufReader, Lines},
    process::{Child, ChildStdout, Command},
};

use crate::{
    client::settings::SnscrapeSettings,
    commons::{
        error::CollectionError,
        post_record::RawPost,
        search_feed::{PostStream, SearchFeed},
    },
};

use super::data_types::Tweet;

/// Twitter search backed by the `snscrape` CLI, one JSON object per stdout line.
pub struct SnscrapeFeed {
    program: String,
    args: Vec<String>,
}

struct FeedState {
    query: String,
    lines: Lines<BufReader<ChildStdout>>,
    child: Child,
}

impl SnscrapeFeed {
    pub fn new(settings: &SnscrapeSettings) -> SnscrapeFeed {
        return SnscrapeFeed {
            program: settings.program.clone(),
            args: settings.args.clone(),
        };
    }

    async fn next_post(mut state: FeedState) -> Result<Option<(RawPost, FeedState)>, CollectionError> {
        loop {
            match state.lines.next_line().await? {
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => {
                    let tweet: Tweet = serde_json::from_str(&line)?;
                    return Ok(Some((tweet.into(), state)));
                }
                None => {
                    let status = state.child.wait().await?;
                    if !status.success() {
                        warn!("search feed exited with {} for query: {}", status, state.query);
                        return Err(CollectionError::Rejected {
                            status,
                            query: state.query,
                        });
                    }
                    debug!("feed drained for query: {}", state.query);
                    return Ok(None);
                }
            }
        }
    }
}

#[async_trait]
impl SearchFeed for SnscrapeFeed {
    async fn search(&self, query: &str) -> Result<PostStream, CollectionError> {
        info!("spawning {} for query: {}", self.program, query);
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(query)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(CollectionError::Unreachable)?;

        let stdout = child.stdout.take().ok_or_else(|| {
            CollectionError::Unreachable(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "search feed stdout is not captured",
            ))
        })?;

        let state = FeedState {
            query: query.to_string(),
            lines: BufReader::new(stdout).lines(),
            child,
        };
        return Ok(futures::stream::try_unfold(state, Self::next_post).boxed());
    }
}
