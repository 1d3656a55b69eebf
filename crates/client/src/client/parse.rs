use crate::adapter::ParseRequestAdapter;
use crate::client::LogParserClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::{DownloadHandle, FilterConfig};

impl LogParserClient {
    /// Submit `filter` and save the resulting workbook.
    pub async fn download_parsed_log(&self, filter: &FilterConfig) -> Result<DownloadHandle> {
        endpoints::parse_log_file(
            &self.http,
            &self.base_url,
            filter,
            &self.download,
            self.max_retries,
            self.metrics.as_ref(),
        )
        .await
    }
}

impl ParseRequestAdapter for LogParserClient {
    async fn parse_log_file(&self, filter: &FilterConfig) -> Result<DownloadHandle> {
        self.download_parsed_log(filter).await
    }
}
