//! Problem solving and the per-user problem log.

use std::sync::Arc;

use chrono::Utc;

use agentforge_types::error::GenerationError;
use agentforge_types::id::{ProblemId, UserId};
use agentforge_types::menu::MenuEntity;
use agentforge_types::problem::{Problem, SolveProblemRequest, SolveProblemResponse};

use crate::llm::resolver::ProviderResolver;
use crate::repository::problem::ProblemRepository;
use crate::repository::setting::SettingRepository;
use crate::service::credential::SecretCipher;

const SYSTEM_PROMPT: &str =
    "You are a coordinator for a team of AI agents. You produce clear, actionable solutions.";
const MAX_TOKENS: u32 = 1500;
const TEMPERATURE: f64 = 0.5;

pub struct ProblemService<P: ProblemRepository, S: SettingRepository, C: SecretCipher> {
    repo: P,
    resolver: Arc<ProviderResolver<S, C>>,
}

impl<P: ProblemRepository, S: SettingRepository, C: SecretCipher> ProblemService<P, S, C> {
    pub fn new(repo: P, resolver: Arc<ProviderResolver<S, C>>) -> Self {
        Self { repo, resolver }
    }

    /// Ask the selected provider for a solution and log it.
    pub async fn solve(
        &self,
        user_id: &UserId,
        request: SolveProblemRequest,
    ) -> Result<SolveProblemResponse, GenerationError> {
        let description = request.problem.trim();
        if description.is_empty() {
            return Err(GenerationError::Validation("problem is required".into()));
        }

        let provider = self
            .resolver
            .resolve(user_id, request.provider.as_deref(), request.model.as_deref())
            .await?;
        let solution = provider
            .ask(
                SYSTEM_PROMPT,
                build_prompt(description, &request.agents),
                MAX_TOKENS,
                Some(TEMPERATURE),
            )
            .await?;

        let now = Utc::now();
        let problem = Problem {
            id: ProblemId::new(),
            user_id: user_id.clone(),
            description: description.to_string(),
            solution: solution.trim().to_string(),
            created_at: now,
            updated_at: now,
        };
        let problem = self
            .repo
            .create(&problem)
            .await
            .map_err(|e| GenerationError::StorageError(e.to_string()))?;

        Ok(SolveProblemResponse {
            solution: problem.solution,
            problem_id: problem.id,
        })
    }

    /// The caller's problem log, newest first.
    pub async fn list(&self, user_id: &UserId) -> Result<Vec<Problem>, GenerationError> {
        self.repo
            .list(user_id)
            .await
            .map_err(|e| GenerationError::StorageError(e.to_string()))
    }
}

fn build_prompt(problem: &str, agents: &[MenuEntity]) -> String {
    let mut prompt = format!("Problem:\n{problem}\n\n");
    if agents.is_empty() {
        prompt.push_str("No specialist agents are available; solve it directly.\n");
    } else {
        prompt.push_str("Available agents:\n");
        for agent in agents.iter().filter(|a| !a.name.is_empty()) {
            if agent.description.is_empty() {
                prompt.push_str(&format!("- {}\n", agent.name));
            } else {
                prompt.push_str(&format!("- {}: {}\n", agent.name, agent.description));
            }
        }
        prompt.push_str(
            "\nExplain how these agents should collaborate, step by step, and say which agent handles each step.\n",
        );
    }
    prompt.push_str("End with a short summary of the final solution.");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryProblemRepository, resolver_with_key};
    use agentforge_types::provider::ProviderKind;

    fn request(problem: &str) -> SolveProblemRequest {
        SolveProblemRequest {
            problem: problem.into(),
            agents: vec![MenuEntity {
                name: "Researcher".into(),
                description: "Finds sources".into(),
            }],
            provider: Some("openai".into()),
            model: None,
        }
    }

    #[test]
    fn test_prompt_lists_agents() {
        let prompt = build_prompt("Ship v2", &request("x").agents);
        assert!(prompt.contains("Ship v2"));
        assert!(prompt.contains("- Researcher: Finds sources"));
    }

    #[tokio::test]
    async fn test_solve_logs_problem() {
        let (user, resolver) = resolver_with_key(ProviderKind::OpenAi, "  Split the work.  ").await;
        let svc = ProblemService::new(MemoryProblemRepository::default(), resolver);

        let response = svc.solve(&user, request("Ship v2")).await.unwrap();
        assert_eq!(response.solution, "Split the work.");

        let log = svc.list(&user).await.unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].id, response.problem_id);
        assert!(svc.list(&UserId::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_problem_rejected() {
        let (user, resolver) = resolver_with_key(ProviderKind::OpenAi, "unused").await;
        let svc = ProblemService::new(MemoryProblemRepository::default(), resolver);
        assert!(matches!(
            svc.solve(&user, request("  ")).await,
            Err(GenerationError::Validation(_))
        ));
    }
}
