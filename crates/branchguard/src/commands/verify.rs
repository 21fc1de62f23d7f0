use async_trait::async_trait;
use branchguard_core::{
    protection::MergeVerifyInput, use_cases::rules::VerifyPullRequestMergeInterface,
};
use branchguard_models::{
    MergeMethod, Principal, PullRequest, Repository, RepositoryPath, RuleViolations,
};
use clap::Parser;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Verify whether a pull request may be merged
#[derive(Parser)]
pub(crate) struct VerifyCommand {
    /// Repository path (e.g. `acme/platform/api`)
    repository_path: RepositoryPath,
    /// Target branch
    #[clap(long)]
    target: String,
    /// Source branch
    #[clap(long)]
    source: String,
    /// Acting principal ID
    #[clap(long)]
    actor: u64,
    /// Requested merge method, allowed methods are listed when missing
    #[clap(long)]
    method: Option<MergeMethod>,
    /// Repository default branch
    #[clap(long, default_value = "main")]
    default_branch: String,
    /// Pull request number
    #[clap(long, default_value_t = 0)]
    number: u64,
    /// Approval count
    #[clap(long, default_value_t = 0)]
    approvals: u64,
    /// Approval count on the latest commit
    #[clap(long, default_value_t = 0)]
    approvals_latest_commit: u64,
    /// A reviewer requested changes
    #[clap(long)]
    change_requested: bool,
    /// Unresolved comment count
    #[clap(long, default_value_t = 0)]
    unresolved_comments: u64,
}

impl VerifyCommand {
    fn build_input(&self) -> MergeVerifyInput {
        MergeVerifyInput {
            actor: Principal::new(self.actor),
            target_repo: Repository {
                id: 0,
                path: self.repository_path.full_name(),
                default_branch: self.default_branch.clone(),
            },
            pull_req: PullRequest {
                number: self.number,
                source_branch: self.source.clone(),
                target_branch: self.target.clone(),
                approvals: self.approvals,
                approvals_latest_commit: self.approvals_latest_commit,
                change_requested: self.change_requested,
                unresolved_comments: self.unresolved_comments,
                ..Default::default()
            },
            method: self.method,
        }
    }
}

#[async_trait]
impl Command for VerifyCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let input = self.build_input();

        let verify_uc: &dyn VerifyPullRequestMergeInterface = ctx.core_module.resolve_ref();
        let (output, violations) = verify_uc
            .run(&ctx.as_core_context(), &ctx.cancel, &input)
            .await?;

        let mut writer = ctx.writer.write().await;
        writeln!(
            writer,
            "Merge of '{}' into '{}' on repository {}:",
            self.source, self.target, self.repository_path
        )?;

        if let Some(methods) = &output.allowed_methods {
            if methods.is_empty() {
                writeln!(writer, "- Allowed methods: none")?;
            } else {
                let methods: Vec<_> = methods.iter().map(|m| m.to_str()).collect();
                writeln!(writer, "- Allowed methods: {}", methods.join(", "))?;
            }
        }
        writeln!(
            writer,
            "- Delete source branch: {}",
            output.delete_source_branch
        )?;

        if violations.is_empty() {
            writeln!(writer, "- No violation.")?;
        }
        for entry in &violations {
            let bypassed = if entry.bypassed { " (bypassed)" } else { "" };
            writeln!(writer, "- Rule '{}'{}:", entry.rule.identifier, bypassed)?;
            for violation in &entry.violations {
                writeln!(writer, "  - [{}] {}", violation.code, violation.message)?;
            }
        }

        if RuleViolations::any_blocking(&violations) {
            writeln!(writer, "Merge blocked.")?;
        } else {
            writeln!(writer, "Merge allowed.")?;
        }

        Ok(())
    }
}
