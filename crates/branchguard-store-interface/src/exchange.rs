use std::io::{Read, Write};

use branchguard_models::{Membership, Rule};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{Result, StoreError, StoreService};

#[derive(Debug, Default, Serialize, Deserialize)]
struct ExchangeData {
    #[serde(default)]
    rules: Vec<Rule>,
    #[serde(default)]
    memberships: Vec<Membership>,
}

pub struct Exchanger;

impl Exchanger {
    pub async fn export_to_json<W: Write>(
        store_service: &dyn StoreService,
        writer: &mut W,
    ) -> Result<()> {
        let data = ExchangeData {
            rules: store_service.rules_all().await?,
            memberships: store_service.memberships_all().await?,
        };

        serde_json::to_writer_pretty(writer, &data)
            .map_err(|e| StoreError::ExchangeJsonError { source: e })?;

        Ok(())
    }

    pub async fn import_from_json<R: Read>(store_service: &dyn StoreService, reader: R) -> Result<()> {
        let data: ExchangeData = serde_json::from_reader(reader)
            .map_err(|e| StoreError::ExchangeJsonError { source: e })?;

        for rule in data.rules {
            info!(
                identifier = %rule.info.identifier,
                space_path = %rule.info.space_path,
                repo_path = %rule.info.repo_path,
                message = "Importing rule"
            );

            store_service.rules_create(rule).await?;
        }

        for membership in data.memberships {
            info!(
                space_path = %membership.space_path,
                principal_id = membership.principal_id,
                role = %membership.role,
                message = "Importing membership"
            );

            store_service.memberships_create(membership).await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockStoreService;

    #[tokio::test]
    async fn import_forwards_rules_and_memberships() {
        let mut store = MockStoreService::new();
        store
            .expect_rules_create()
            .times(2)
            .returning(|rule| Ok(rule));
        store
            .expect_memberships_create()
            .times(1)
            .returning(|membership| Ok(membership));

        let input = r#"{
            "rules": [
                {"id": 1, "identifier": "a", "repo_path": "space/repo", "type": "branch", "pattern": {}, "definition": {}},
                {"id": 2, "identifier": "b", "space_path": "space", "type": "branch", "pattern": {}, "definition": {}}
            ],
            "memberships": [
                {"space_path": "space", "principal_id": 3, "role": "space_owner"}
            ]
        }"#;

        Exchanger::import_from_json(&store, input.as_bytes())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn import_invalid_json() {
        let store = MockStoreService::new();
        let result = Exchanger::import_from_json(&store, "{".as_bytes()).await;

        assert!(matches!(result, Err(StoreError::ExchangeJsonError { .. })));
    }
}
