//! Integration tests for the catalog client's cancellation path.

use movie_finder::services::tmdb::{MovieCatalog, TmdbClient, TmdbConfig};
use movie_finder::Error;
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn test_cancelled_token_short_circuits_to_timeout() {
    let client = TmdbClient::new(TmdbConfig::new("eyJtest".to_string()));

    let cancel = CancellationToken::new();
    cancel.cancel();

    // A cancelled token wins the race before any network activity.
    let err = client.search("dune", &cancel).await.unwrap_err();
    assert!(matches!(err, Error::Timeout));

    let err = client.discover(&cancel).await.unwrap_err();
    assert!(matches!(err, Error::Timeout));
}
