use async_trait::async_trait;
use tokio::time::{sleep, Duration};

use crate::{common::*, reveal::errors::RevealError};

/// The two on-chain fields the resolver needs from a minted asset: the
/// pointer to the off-chain JSON document and the name recorded on-chain,
/// used as a fallback when the document is missing or incomplete.
pub struct OnChainAsset {
    pub document_uri: String,
    pub fallback_name: String,
}

/// Reads the on-chain record of a minted asset. Failures propagate: without
/// the on-chain record there is nothing to resolve.
#[async_trait]
pub trait AssetReader {
    async fn read(&self, asset: &Pubkey) -> Result<OnChainAsset>;
}

/// Retrieves and parses an off-chain JSON document. Any non-success status
/// or parse failure surfaces as an error; the resolver absorbs those.
#[async_trait]
pub trait DocumentFetcher {
    async fn get_json(&self, uri: &str) -> Result<Value>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trait {
    /// Position of the attribute in the off-chain document, zero-based.
    pub id: usize,
    pub trait_type: String,
    pub value: String,
}

/// Display metadata of one minted asset, merged from the off-chain document
/// and the on-chain fallback values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintMetadata {
    pub name: String,
    pub image_url: Option<String>,
    pub animation_url: Option<String>,
    /// Attributes in document order; empty when the document is absent or
    /// malformed, never missing.
    pub traits: Vec<Trait>,
}

impl MintMetadata {
    pub fn has_media(&self) -> bool {
        self.animation_url.is_some() || self.image_url.is_some()
    }

    /// An asset counts as revealed once it has any media or at least one
    /// trait to show.
    pub fn is_revealed(&self) -> bool {
        self.has_media() || !self.traits.is_empty()
    }

    fn unrevealed() -> Self {
        MintMetadata {
            name: DEFAULT_NFT_NAME.to_string(),
            image_url: None,
            animation_url: None,
            traits: Vec::new(),
        }
    }
}

/// Normalize the attribute list of an off-chain document. Indexers and
/// creator tools disagree on key spellings, so both the trait type and the
/// value fall through a list of known variants.
pub fn parse_traits(document: &Value) -> Vec<Trait> {
    let attributes = match document.get("attributes").and_then(Value::as_array) {
        Some(attributes) => attributes,
        None => return Vec::new(),
    };

    attributes
        .iter()
        .enumerate()
        .map(|(id, attribute)| Trait {
            id,
            trait_type: string_field(attribute, &["trait_type", "traitType", "type"])
                .unwrap_or_else(|| "Trait".to_string()),
            value: string_field(attribute, &["value", "val"]).unwrap_or_default(),
        })
        .collect()
}

/// First populated value among the given keys. Numeric values are rendered
/// as strings; empty strings count as unpopulated.
fn string_field(value: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        match value.get(key) {
            Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => (),
        }
    }
    None
}

fn merge_metadata(document: Option<&Value>, asset: &OnChainAsset) -> MintMetadata {
    let name = document
        .and_then(|d| string_field(d, &["name"]))
        .or_else(|| {
            if asset.fallback_name.is_empty() {
                None
            } else {
                Some(asset.fallback_name.clone())
            }
        })
        .unwrap_or_else(|| DEFAULT_NFT_NAME.to_string());

    let image_url = document.and_then(|d| string_field(d, &["image", "imageUrl", "imageURL"]));
    let animation_url =
        document.and_then(|d| string_field(d, &["animation_url", "animationURL", "animation"]));
    let traits = document.map(parse_traits).unwrap_or_default();

    MintMetadata {
        name,
        image_url,
        animation_url,
        traits,
    }
}

/// Resolves the display metadata of freshly minted assets.
///
/// Indexing of the off-chain document usually lags transaction confirmation
/// by a few seconds, so [`resolve_with_retry`](MetadataResolver::resolve_with_retry)
/// polls with a linearly growing delay until the metadata is worth showing
/// or the attempt budget runs out. Each invocation is independent; there is
/// no shared state and no cancellation, callers discard stale results.
pub struct MetadataResolver<R, F> {
    reader: R,
    fetcher: F,
    base_delay: Duration,
}

impl<R: AssetReader, F: DocumentFetcher> MetadataResolver<R, F> {
    pub fn new(reader: R, fetcher: F) -> Self {
        Self::with_base_delay(reader, fetcher, Duration::from_millis(METADATA_RETRY_DELAY_MS))
    }

    /// The base delay is injectable so tests run without real waits.
    pub fn with_base_delay(reader: R, fetcher: F, base_delay: Duration) -> Self {
        MetadataResolver {
            reader,
            fetcher,
            base_delay,
        }
    }

    /// One resolution attempt: one on-chain read, at most one off-chain
    /// document fetch. A failed document fetch is logged and treated as
    /// "no document" (the on-chain name is still usable); a failed on-chain
    /// read propagates.
    pub async fn fetch_once(&self, asset: &Pubkey) -> Result<MintMetadata> {
        let onchain = self.reader.read(asset).await?;

        let document = if onchain.document_uri.is_empty() {
            None
        } else {
            match self.fetcher.get_json(&onchain.document_uri).await {
                Ok(document) => Some(document),
                Err(err) => {
                    warn!(
                        "Off-chain metadata fetch failed for {}: {}",
                        onchain.document_uri, err
                    );
                    None
                }
            }
        };

        Ok(merge_metadata(document.as_ref(), &onchain))
    }

    /// Poll [`fetch_once`](MetadataResolver::fetch_once) up to `max_attempts`
    /// times, accepting a result as soon as it has media or traits; the
    /// final attempt is accepted unconditionally. Attempt failures are
    /// recorded and retried on the same schedule. The call fails only when
    /// no attempt ever produced a value; metadata lookup must never make a
    /// confirmed mint look failed.
    pub async fn resolve_with_retry(
        &self,
        asset: &Pubkey,
        max_attempts: u8,
    ) -> Result<MintMetadata> {
        let mut last_value: Option<MintMetadata> = None;
        let mut last_error: Option<anyhow::Error> = None;

        for attempt in 1..=max_attempts {
            match self.fetch_once(asset).await {
                Ok(metadata) => {
                    if metadata.is_revealed() || attempt == max_attempts {
                        return Ok(metadata);
                    }
                    debug!(
                        "Attempt {} for {} returned no media or traits yet",
                        attempt, asset
                    );
                    last_value = Some(metadata);
                }
                Err(err) => {
                    warn!("Metadata attempt {} failed for {}: {:?}", attempt, asset, err);
                    last_error = Some(err);
                }
            }

            if attempt < max_attempts {
                sleep(self.base_delay * attempt as u32).await;
            }
        }

        // Only reachable when the final attempt failed the on-chain read.
        if let Some(metadata) = last_value {
            return Ok(metadata);
        }

        match last_error {
            Some(err) => Err(RevealError::MetadataUnavailable(
                asset.to_string(),
                max_attempts,
                err.to_string(),
            )
            .into()),
            None => Ok(MintMetadata::unrevealed()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::VecDeque,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Mutex,
        },
    };

    use super::*;

    struct FakeReader {
        script: Mutex<VecDeque<Result<OnChainAsset>>>,
        reads: AtomicUsize,
    }

    impl FakeReader {
        fn new(script: Vec<Result<OnChainAsset>>) -> Self {
            FakeReader {
                script: Mutex::new(script.into_iter().collect()),
                reads: AtomicUsize::new(0),
            }
        }

        fn repeating(uri: &str, name: &str, times: usize) -> Self {
            Self::new(
                (0..times)
                    .map(|_| {
                        Ok(OnChainAsset {
                            document_uri: uri.to_string(),
                            fallback_name: name.to_string(),
                        })
                    })
                    .collect(),
            )
        }

        fn failing(times: usize) -> Self {
            Self::new((0..times).map(|_| Err(anyhow!("rpc unavailable"))).collect())
        }

        fn reads(&self) -> usize {
            self.reads.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AssetReader for &FakeReader {
        async fn read(&self, _asset: &Pubkey) -> Result<OnChainAsset> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected extra on-chain read")
        }
    }

    struct FakeFetcher {
        script: Mutex<VecDeque<Result<Value>>>,
        calls: AtomicUsize,
    }

    impl FakeFetcher {
        fn new(script: Vec<Result<Value>>) -> Self {
            FakeFetcher {
                script: Mutex::new(script.into_iter().collect()),
                calls: AtomicUsize::new(0),
            }
        }

        fn unavailable(times: usize) -> Self {
            Self::new(
                (0..times)
                    .map(|_| Err(anyhow!("Unexpected status 404")))
                    .collect(),
            )
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DocumentFetcher for &FakeFetcher {
        async fn get_json(&self, _uri: &str) -> Result<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected extra document fetch")
        }
    }

    fn resolver<'a>(
        reader: &'a FakeReader,
        fetcher: &'a FakeFetcher,
    ) -> MetadataResolver<&'a FakeReader, &'a FakeFetcher> {
        MetadataResolver::with_base_delay(reader, fetcher, Duration::ZERO)
    }

    fn document_with_traits() -> Value {
        json!({
            "name": "Bonbon #7",
            "image": "https://example/7.png",
            "attributes": [
                { "trait_type": "Eyes", "value": "Red" },
                { "trait_type": "Hat", "value": "Cap" }
            ]
        })
    }

    #[tokio::test]
    async fn test_resolve_accepts_first_attempt_with_traits() {
        let reader = FakeReader::repeating("https://example/7.json", "#7", 1);
        let fetcher = FakeFetcher::new(vec![Ok(document_with_traits())]);

        let metadata = resolver(&reader, &fetcher)
            .resolve_with_retry(&Pubkey::new_unique(), 5)
            .await
            .unwrap();

        assert_eq!(reader.reads(), 1);
        assert_eq!(metadata.name, "Bonbon #7");
        assert_eq!(metadata.image_url.as_deref(), Some("https://example/7.png"));
        assert_eq!(metadata.traits.len(), 2);
    }

    #[tokio::test]
    async fn test_resolve_retries_until_document_appears() {
        let reader = FakeReader::repeating("https://example/7.json", "#7", 5);
        let mut script: Vec<Result<Value>> = (0..4)
            .map(|_| Err(anyhow!("Unexpected status 404")))
            .collect();
        script.push(Ok(document_with_traits()));
        let fetcher = FakeFetcher::new(script);

        let metadata = resolver(&reader, &fetcher)
            .resolve_with_retry(&Pubkey::new_unique(), 5)
            .await
            .unwrap();

        assert_eq!(reader.reads(), 5);
        assert_eq!(fetcher.calls(), 5);
        assert_eq!(metadata.traits.len(), 2);
    }

    #[tokio::test]
    async fn test_resolve_exhaustion_returns_default_name() {
        let reader = FakeReader::repeating("https://example/7.json", "", 5);
        let fetcher = FakeFetcher::unavailable(5);

        let metadata = resolver(&reader, &fetcher)
            .resolve_with_retry(&Pubkey::new_unique(), 5)
            .await
            .unwrap();

        assert_eq!(reader.reads(), 5);
        assert_eq!(metadata.name, DEFAULT_NFT_NAME);
        assert!(metadata.image_url.is_none());
        assert!(metadata.animation_url.is_none());
        assert!(metadata.traits.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_propagates_when_every_read_fails() {
        let reader = FakeReader::failing(5);
        let fetcher = FakeFetcher::new(Vec::new());

        let err = resolver(&reader, &fetcher)
            .resolve_with_retry(&Pubkey::new_unique(), 5)
            .await
            .unwrap_err();

        assert_eq!(reader.reads(), 5);
        assert_eq!(fetcher.calls(), 0);
        assert!(err.to_string().contains("after 5 attempt(s)"));
    }

    #[tokio::test]
    async fn test_resolve_keeps_last_value_over_final_read_failure() {
        let mut script: Vec<Result<OnChainAsset>> = (0..4)
            .map(|_| {
                Ok(OnChainAsset {
                    document_uri: String::new(),
                    fallback_name: "#7".to_string(),
                })
            })
            .collect();
        script.push(Err(anyhow!("rpc unavailable")));
        let reader = FakeReader::new(script);
        let fetcher = FakeFetcher::new(Vec::new());

        let metadata = resolver(&reader, &fetcher)
            .resolve_with_retry(&Pubkey::new_unique(), 5)
            .await
            .unwrap();

        assert_eq!(reader.reads(), 5);
        assert_eq!(metadata.name, "#7");
        assert!(metadata.traits.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_once_absorbs_document_failure() {
        let reader = FakeReader::repeating("https://example/meta.json", "#7", 1);
        let fetcher = FakeFetcher::unavailable(1);

        let metadata = resolver(&reader, &fetcher)
            .fetch_once(&Pubkey::new_unique())
            .await
            .unwrap();

        assert_eq!(fetcher.calls(), 1);
        assert_eq!(metadata.name, "#7");
        assert!(metadata.traits.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_once_skips_fetch_for_empty_uri() {
        let reader = FakeReader::repeating("", "#7", 1);
        let fetcher = FakeFetcher::new(Vec::new());

        let metadata = resolver(&reader, &fetcher)
            .fetch_once(&Pubkey::new_unique())
            .await
            .unwrap();

        assert_eq!(fetcher.calls(), 0);
        assert_eq!(metadata.name, "#7");
    }

    #[tokio::test]
    async fn test_fetch_once_resolves_alternate_key_spellings() {
        let reader = FakeReader::repeating("https://example/7.json", "#7", 1);
        let fetcher = FakeFetcher::new(vec![Ok(json!({
            "imageURL": "https://example/alt.png",
            "attributes": [ { "traitType": "Mood", "val": "Chill" } ]
        }))]);

        let metadata = resolver(&reader, &fetcher)
            .fetch_once(&Pubkey::new_unique())
            .await
            .unwrap();

        assert_eq!(metadata.image_url.as_deref(), Some("https://example/alt.png"));
        assert_eq!(metadata.traits[0].trait_type, "Mood");
        assert_eq!(metadata.traits[0].value, "Chill");
    }

    #[test]
    fn test_parse_traits_preserves_order_and_ids() {
        let traits = parse_traits(&json!({
            "attributes": [
                { "trait_type": "Eyes", "value": "Red" },
                { "trait_type": "Hat", "value": "Cap" }
            ]
        }));

        assert_eq!(
            traits,
            vec![
                Trait {
                    id: 0,
                    trait_type: "Eyes".to_string(),
                    value: "Red".to_string()
                },
                Trait {
                    id: 1,
                    trait_type: "Hat".to_string(),
                    value: "Cap".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_parse_traits_defaults_for_missing_fields() {
        let traits = parse_traits(&json!({
            "attributes": [ { "value": "Solo" }, { "type": "Level", "value": 9 } ]
        }));

        assert_eq!(traits[0].trait_type, "Trait");
        assert_eq!(traits[0].value, "Solo");
        assert_eq!(traits[1].trait_type, "Level");
        assert_eq!(traits[1].value, "9");
    }

    #[test]
    fn test_parse_traits_handles_malformed_documents() {
        assert!(parse_traits(&json!({})).is_empty());
        assert!(parse_traits(&json!({ "attributes": "nope" })).is_empty());
        assert!(parse_traits(&json!(null)).is_empty());
    }
}
