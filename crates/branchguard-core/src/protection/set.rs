//! Ordered rule sets.

use branchguard_models::{MergeMethod, Rule, RuleState, RuleViolations};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::{intersect_sorted, BypassResolver, DefinitionManager, MergeVerifyInput, MergeVerifyOutput, Pattern};
use crate::{DomainError, Result};

/// Rules applying to a repository, in application order.
pub struct RuleSet<'a> {
    rules: Vec<Rule>,
    manager: &'a DefinitionManager,
}

impl<'a> RuleSet<'a> {
    pub fn new(rules: Vec<Rule>, manager: &'a DefinitionManager) -> Self {
        Self { rules, manager }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Evaluate a merge attempt against every active rule matching the
    /// target branch.
    ///
    /// Defective rules are skipped. Only cancellation, invalid input and
    /// resolver failures abort the evaluation.
    pub async fn merge_verify(
        &self,
        cancel: &CancellationToken,
        resolver: &dyn BypassResolver,
        input: &MergeVerifyInput,
    ) -> Result<(MergeVerifyOutput, Vec<RuleViolations>)> {
        validate_input(input)?;

        let target_branch = input.pull_req.target_branch.as_str();
        let default_branch = input.target_repo.default_branch.as_str();

        let mut output = MergeVerifyOutput::default();
        let mut violations = Vec::new();

        for rule in &self.rules {
            if cancel.is_cancelled() {
                return Err(DomainError::Cancelled);
            }

            let info = &rule.info;
            if info.state != RuleState::Active {
                debug!(
                    rule_id = info.id,
                    identifier = %info.identifier,
                    state = %info.state,
                    message = "Skipping inactive rule"
                );
                continue;
            }

            let pattern = match Pattern::parse(&rule.pattern).and_then(|p| p.compile()) {
                Ok(pattern) => pattern,
                Err(e) => {
                    warn!(
                        rule_id = info.id,
                        identifier = %info.identifier,
                        error = %e,
                        message = "Skipping rule with invalid pattern"
                    );
                    continue;
                }
            };

            if !pattern.matches(target_branch, default_branch) {
                continue;
            }

            let definition = match self.manager.from_raw(&info.rule_type, &rule.definition) {
                Ok(definition) => definition,
                Err(e) => {
                    warn!(
                        rule_id = info.id,
                        identifier = %info.identifier,
                        error = %e,
                        message = "Skipping rule with invalid definition"
                    );
                    continue;
                }
            };

            let check = definition.merge_verify(input);
            let restricts = check.delete_source_branch || check.allowed_methods.is_some();

            let bypassed = if definition.bypass().is_empty()
                || (check.violations.is_empty() && !restricts)
            {
                false
            } else {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return Err(DomainError::Cancelled),
                    bypassed = definition.bypass().matches(resolver, &input.actor, &input.target_repo) => bypassed?,
                }
            };

            if bypassed {
                debug!(
                    rule_id = info.id,
                    identifier = %info.identifier,
                    actor_id = input.actor.id,
                    message = "Rule bypassed"
                );
            }

            if !check.violations.is_empty() {
                violations.push(RuleViolations {
                    rule: info.clone(),
                    bypassed,
                    violations: check.violations,
                });
            }

            if bypassed {
                continue;
            }

            output.delete_source_branch |= check.delete_source_branch;
            if let Some(allowed) = check.allowed_methods {
                output.allowed_methods = Some(match output.allowed_methods.take() {
                    Some(current) => intersect_sorted(current, &allowed),
                    None => allowed,
                });
            }
        }

        if input.method.is_none() && output.allowed_methods.is_none() {
            output.allowed_methods = Some(MergeMethod::all());
        }

        Ok((output, violations))
    }
}

fn validate_input(input: &MergeVerifyInput) -> Result<()> {
    if input.pull_req.target_branch.is_empty() {
        return Err(DomainError::InvalidInput {
            message: "target branch must not be empty".into(),
        });
    }

    input
        .target_repo
        .repository_path()
        .map_err(|e| DomainError::InvalidInput {
            message: e.to_string(),
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use branchguard_models::{
        Principal, PullRequest, Repository, RuleInfo, ViolationCode,
    };
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::protection::{default_manager, MockBypassResolver, TYPE_BRANCH};

    fn rule(id: u64, pattern: &str, definition: &str) -> Rule {
        Rule {
            info: RuleInfo {
                id,
                identifier: format!("rule-{id}"),
                repo_path: "space/repo".into(),
                rule_type: TYPE_BRANCH.into(),
                ..Default::default()
            },
            pattern: pattern.as_bytes().to_vec(),
            definition: definition.as_bytes().to_vec(),
        }
    }

    fn input(method: Option<MergeMethod>) -> MergeVerifyInput {
        MergeVerifyInput {
            actor: Principal::new(42),
            target_repo: Repository {
                id: 1,
                path: "space/repo".into(),
                default_branch: "main".into(),
            },
            pull_req: PullRequest {
                number: 1,
                source_branch: "feature".into(),
                target_branch: "main".into(),
                ..Default::default()
            },
            method,
        }
    }

    async fn verify(
        rules: Vec<Rule>,
        input: &MergeVerifyInput,
    ) -> Result<(MergeVerifyOutput, Vec<RuleViolations>)> {
        RuleSet::new(rules, default_manager())
            .merge_verify(&CancellationToken::new(), &MockBypassResolver::new(), input)
            .await
    }

    #[tokio::test]
    async fn empty_with_method() {
        let (output, violations) = verify(vec![], &input(Some(MergeMethod::Merge)))
            .await
            .unwrap();

        assert_eq!(output, MergeVerifyOutput::default());
        assert!(violations.is_empty());
    }

    #[tokio::test]
    async fn empty_without_method() {
        let (output, violations) = verify(vec![], &input(None)).await.unwrap();

        assert!(!output.delete_source_branch);
        assert_eq!(output.allowed_methods, Some(MergeMethod::all()));
        assert!(violations.is_empty());
    }

    #[tokio::test]
    async fn two_rules_delete_source_branch() {
        let rules = vec![
            rule(
                1,
                "{}",
                r#"{"pullreq":{"merge":{"strategies_allowed":["merge"],"delete_branch":true}}}"#,
            ),
            rule(
                2,
                "{}",
                r#"{"pullreq":{"merge":{"strategies_allowed":["merge"]}}}"#,
            ),
        ];

        let (output, violations) = verify(rules, &input(Some(MergeMethod::Rebase)))
            .await
            .unwrap();

        assert!(output.delete_source_branch);
        assert_eq!(output.allowed_methods, None);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].rule.id, 1);
        assert_eq!(violations[1].rule.id, 2);
        for entry in &violations {
            assert!(!entry.bypassed);
            assert_eq!(entry.violations.len(), 1);
            assert_eq!(
                entry.violations[0].code,
                ViolationCode::MergeStrategiesAllowed
            );
        }
    }

    #[tokio::test]
    async fn strategy_and_approvals_violations() {
        let mut approvals = rule(
            2,
            "{}",
            r#"{"pullreq":{"approvals":{"require_minimum_count":1}}}"#,
        );
        approvals.info.repo_path = String::new();
        approvals.info.space_path = "space".into();

        let rules = vec![
            rule(
                1,
                "{}",
                r#"{"pullreq":{"merge":{"strategies_allowed":["merge"],"delete_branch":true}}}"#,
            ),
            approvals,
        ];

        let (output, violations) = verify(rules, &input(Some(MergeMethod::Rebase)))
            .await
            .unwrap();

        assert_eq!(
            output,
            MergeVerifyOutput {
                delete_source_branch: true,
                allowed_methods: None,
            }
        );

        let codes: Vec<_> = violations
            .iter()
            .map(|entry| {
                (
                    entry.rule.id,
                    entry.bypassed,
                    entry.violations.iter().map(|v| v.code).collect::<Vec<_>>(),
                )
            })
            .collect();
        assert_eq!(
            codes,
            vec![
                (1, false, vec![ViolationCode::MergeStrategiesAllowed]),
                (2, false, vec![ViolationCode::ApprovalsRequireMinimumCount]),
            ]
        );
    }

    #[tokio::test]
    async fn two_rules_merge_strategies() {
        let rules = vec![
            rule(
                1,
                "{}",
                r#"{"pullreq":{"merge":{"strategies_allowed":["merge","rebase"]}}}"#,
            ),
            rule(
                2,
                "{}",
                r#"{"pullreq":{"merge":{"strategies_allowed":["rebase"]}}}"#,
            ),
        ];

        let (output, violations) = verify(rules, &input(None)).await.unwrap();

        assert!(!output.delete_source_branch);
        assert_eq!(output.allowed_methods, Some(vec![MergeMethod::Rebase]));
        assert!(violations.is_empty());
    }

    #[tokio::test]
    async fn disjoint_strategies() {
        let rules = vec![
            rule(1, "{}", r#"{"pullreq":{"merge":{"strategies_allowed":["merge"]}}}"#),
            rule(2, "{}", r#"{"pullreq":{"merge":{"strategies_allowed":["squash"]}}}"#),
        ];

        let (output, _) = verify(rules, &input(None)).await.unwrap();

        assert_eq!(output.allowed_methods, Some(vec![]));
    }

    #[tokio::test]
    async fn unrestricted_rule_does_not_narrow() {
        let rules = vec![
            rule(1, "{}", r#"{"pullreq":{"merge":{"delete_branch":true}}}"#),
            rule(2, "{}", r#"{"pullreq":{"merge":{"strategies_allowed":["squash"]}}}"#),
        ];

        let (output, _) = verify(rules, &input(None)).await.unwrap();

        assert!(output.delete_source_branch);
        assert_eq!(output.allowed_methods, Some(vec![MergeMethod::Squash]));
    }

    #[tokio::test]
    async fn pattern_anchors_to_target_branch() {
        let rules = vec![rule(
            1,
            r#"{"include":["release/*"]}"#,
            r#"{"pullreq":{"merge":{"delete_branch":true}}}"#,
        )];

        let (output, _) = verify(rules.clone(), &input(None)).await.unwrap();
        assert!(!output.delete_source_branch);

        let mut release = input(None);
        release.pull_req.target_branch = "release/1.0".into();
        let (output, _) = verify(rules, &release).await.unwrap();
        assert!(output.delete_source_branch);
    }

    #[tokio::test]
    async fn defective_rules_are_skipped() {
        let mut unknown = rule(3, "{}", "{}");
        unknown.info.rule_type = "tag".into();

        let rules = vec![
            rule(1, "{not json", r#"{"pullreq":{"merge":{"delete_branch":true}}}"#),
            rule(2, "{}", r#"{"pullreq":{"merge":{"strategies_allowed":["merge","merge"]}}}"#),
            unknown,
            rule(4, r#"{"include":["["]}"#, r#"{"pullreq":{"merge":{"delete_branch":true}}}"#),
            rule(5, "{}", r#"{"pullreq":{"merge":{"strategies_allowed":["squash"]}}}"#),
        ];

        let (output, violations) = verify(rules, &input(None)).await.unwrap();

        assert!(!output.delete_source_branch);
        assert_eq!(output.allowed_methods, Some(vec![MergeMethod::Squash]));
        assert!(violations.is_empty());
    }

    #[tokio::test]
    async fn inactive_rules_are_skipped() {
        let mut disabled = rule(1, "{}", r#"{"pullreq":{"merge":{"delete_branch":true}}}"#);
        disabled.info.state = RuleState::Disabled;
        let mut monitor = rule(2, "{}", r#"{"pullreq":{"approvals":{"require_minimum_count":3}}}"#);
        monitor.info.state = RuleState::Monitor;

        let (output, violations) = verify(vec![disabled, monitor], &input(None))
            .await
            .unwrap();

        assert!(!output.delete_source_branch);
        assert!(violations.is_empty());
    }

    #[tokio::test]
    async fn bypassed_rule() {
        let rules = vec![
            rule(
                1,
                "{}",
                r#"{"bypass":{"user_ids":[42]},"pullreq":{"approvals":{"require_minimum_count":2},"merge":{"strategies_allowed":["merge"],"delete_branch":true}}}"#,
            ),
            rule(
                2,
                "{}",
                r#"{"bypass":{"repo_owners":true},"pullreq":{"approvals":{"require_minimum_count":1}}}"#,
            ),
        ];

        let mut resolver = MockBypassResolver::new();
        resolver
            .expect_is_repo_owner()
            .times(1)
            .returning(|_, _| Ok(false));

        let (output, violations) = RuleSet::new(rules, default_manager())
            .merge_verify(&CancellationToken::new(), &resolver, &input(None))
            .await
            .unwrap();

        assert!(!output.delete_source_branch);
        assert_eq!(output.allowed_methods, Some(MergeMethod::all()));
        assert_eq!(violations.len(), 2);
        assert!(violations[0].bypassed);
        assert!(!violations[1].bypassed);
        assert!(RuleViolations::any_blocking(&violations));
    }

    #[tokio::test]
    async fn space_role_bypass() {
        let rules = vec![rule(
            1,
            "{}",
            r#"{"bypass":{"space_roles":["space_owner"]},"pullreq":{"approvals":{"require_minimum_count":1},"merge":{"delete_branch":true}}}"#,
        )];

        let mut resolver = MockBypassResolver::new();
        resolver
            .expect_has_space_role()
            .times(1)
            .returning(|actor, _, _| Ok(actor.id == 42));

        let (output, violations) = RuleSet::new(rules, default_manager())
            .merge_verify(&CancellationToken::new(), &resolver, &input(None))
            .await
            .unwrap();

        assert!(!output.delete_source_branch);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].bypassed);
        assert!(!RuleViolations::any_blocking(&violations));
    }

    #[tokio::test]
    async fn resolver_failure_is_an_error() {
        let rules = vec![rule(
            1,
            "{}",
            r#"{"bypass":{"repo_owners":true},"pullreq":{"approvals":{"require_minimum_count":1}}}"#,
        )];

        let mut resolver = MockBypassResolver::new();
        resolver
            .expect_is_repo_owner()
            .returning(|_, _| Err(DomainError::Cancelled));

        let result = RuleSet::new(rules, default_manager())
            .merge_verify(&CancellationToken::new(), &resolver, &input(None))
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn cancelled() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = RuleSet::new(vec![rule(1, "{}", "{}")], default_manager())
            .merge_verify(&cancel, &MockBypassResolver::new(), &input(None))
            .await;

        assert!(matches!(result, Err(DomainError::Cancelled)));
    }

    #[tokio::test]
    async fn invalid_input() {
        let mut no_target = input(None);
        no_target.pull_req.target_branch = String::new();
        assert!(matches!(
            verify(vec![], &no_target).await,
            Err(DomainError::InvalidInput { .. })
        ));

        let mut bad_repo = input(None);
        bad_repo.target_repo.path = "repo".into();
        assert!(matches!(
            verify(vec![], &bad_repo).await,
            Err(DomainError::InvalidInput { .. })
        ));
    }
}
