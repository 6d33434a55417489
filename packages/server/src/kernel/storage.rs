//! S3-backed implementation of [`BaseObjectStorage`].
//!
//! Keys are namespaced by purpose: source documents live under
//! `uploads/{user_id}/{file_name}` and generated artifacts under
//! `generated/{project_id}/{content_id}_{file_name}`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;

use crate::common::{ContentId, ProjectId, UserId};

use super::traits::BaseObjectStorage;

/// Storage key for an uploaded source document.
pub fn upload_key(user_id: UserId, file_name: &str) -> String {
    format!("uploads/{}/{}", user_id, file_name)
}

/// Storage key for a generated artifact.
pub fn generated_key(project_id: ProjectId, content_id: ContentId, file_name: &str) -> String {
    format!("generated/{}/{}_{}", project_id, content_id, file_name)
}

/// S3 object storage client.
pub struct S3ObjectStorage {
    client: aws_sdk_s3::Client,
    bucket: String,
    region: String,
}

impl S3ObjectStorage {
    /// Connect using the ambient AWS credential chain.
    pub async fn connect(bucket: String, region: String) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.clone()))
            .load()
            .await;

        Self {
            client: aws_sdk_s3::Client::new(&config),
            bucket,
            region,
        }
    }
}

#[async_trait]
impl BaseObjectStorage for S3ObjectStorage {
    async fn download(&self, key: &str) -> Result<Vec<u8>> {
        let object = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .with_context(|| format!("failed to download object {}", key))?;

        let bytes = object
            .body
            .collect()
            .await
            .with_context(|| format!("failed to read object body {}", key))?;

        Ok(bytes.into_bytes().to_vec())
    }

    async fn upload(&self, key: &str, bytes: Vec<u8>) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .with_context(|| format!("failed to upload object {}", key))?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .with_context(|| format!("failed to delete object {}", key))?;

        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("https://{}.s3.{}.amazonaws.com/{}", self.bucket, self.region, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::MemoryObjectStorage;

    #[test]
    fn upload_key_is_namespaced_by_user() {
        let user_id = UserId::new();
        let key = upload_key(user_id, "biology.pdf");
        assert_eq!(key, format!("uploads/{}/biology.pdf", user_id));
    }

    #[test]
    fn generated_key_combines_project_and_content() {
        let project_id = ProjectId::new();
        let content_id = ContentId::new();
        let key = generated_key(project_id, content_id, "deck.pptx");
        assert_eq!(key, format!("generated/{}/{}_deck.pptx", project_id, content_id));
    }

    #[test]
    fn key_roundtrips_through_public_url() {
        let storage = MemoryObjectStorage::new();
        let key = "generated/abc/def_deck.pptx";
        let url = storage.public_url(key);
        assert_eq!(storage.key_from_url(&url).as_deref(), Some(key));
    }
}
