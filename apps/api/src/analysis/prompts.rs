// Prompt templates for the three résumé actions.
// Placeholders are substituted in one pass by `render`; the résumé text and
// job role are embedded exactly as given.

use thiserror::Error;

use crate::analysis::models::Action;

/// Résumé analysis prompt. Replace `{resume_text}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = "\
Analyze the following resume and extract key details:
- Name
- Contact information
- Email address
- Education
- Work experience
- Skills
- Certifications
Provide a detailed analysis of the candidate's strengths, weaknesses, and areas for improvement. Also, give a rating out of 10.

Resume Content:
{resume_text}
";

/// Job recommendation prompt. Replace `{resume_text}` before sending.
pub const RECOMMENDATIONS_PROMPT_TEMPLATE: &str = "\
Based on the following resume content, suggest suitable job roles or industries for the candidate.
Ensure the roles are appropriate to the candidate's skills, education, and experience level.

Resume Content:
{resume_text}
";

/// Job matching prompt. Replace `{job_role}` and `{resume_text}` before sending.
pub const JOB_MATCHING_PROMPT_TEMPLATE: &str = "\
Evaluate how well the candidate's resume matches the job role \"{job_role}\".
Provide a match percentage and suggest ways to improve the chances of landing this role.

Resume Content:
{resume_text}
";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("Job matching requires a job role")]
    MissingJobRole,
}

/// Renders the prompt for `action`.
pub fn build_prompt(
    action: Action,
    resume_text: &str,
    job_role: Option<&str>,
) -> Result<String, PromptError> {
    let prompt = match action {
        Action::AnalyzeResume => render(ANALYSIS_PROMPT_TEMPLATE, &[("resume_text", resume_text)]),
        Action::RecommendJobs => render(
            RECOMMENDATIONS_PROMPT_TEMPLATE,
            &[("resume_text", resume_text)],
        ),
        Action::MatchJob => {
            let job_role = job_role
                .filter(|role| !role.trim().is_empty())
                .ok_or(PromptError::MissingJobRole)?;
            render(
                JOB_MATCHING_PROMPT_TEMPLATE,
                &[("job_role", job_role), ("resume_text", resume_text)],
            )
        }
    };
    Ok(prompt)
}

/// Replaces `{key}` placeholders in a single left-to-right scan, so values
/// that happen to contain placeholder syntax are copied through untouched.
fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(
        template.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>(),
    );
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substituted = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (*value, close))
        });
        match substituted {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Doe\njane@example.com\nPython developer, 5 years";

    #[test]
    fn test_analysis_prompt_embeds_text_and_rating_instruction() {
        let prompt = build_prompt(Action::AnalyzeResume, RESUME, None).unwrap();
        assert!(prompt.contains(RESUME));
        assert!(prompt.contains("rating out of 10"));
        assert!(prompt.contains("Certifications"));
        assert!(!prompt.contains("{resume_text}"));
    }

    #[test]
    fn test_recommendations_prompt_embeds_text() {
        let prompt = build_prompt(Action::RecommendJobs, RESUME, None).unwrap();
        assert!(prompt.contains(RESUME));
        assert!(prompt.contains("suitable job roles"));
    }

    #[test]
    fn test_job_matching_prompt_embeds_role_and_text() {
        let prompt = build_prompt(Action::MatchJob, RESUME, Some("Data Engineer")).unwrap();
        assert!(prompt.contains(RESUME));
        assert!(prompt.contains("match percentage"));
        assert!(prompt.contains("\"Data Engineer\""));
    }

    #[test]
    fn test_job_matching_without_role_fails() {
        assert_eq!(
            build_prompt(Action::MatchJob, RESUME, None),
            Err(PromptError::MissingJobRole)
        );
        assert_eq!(
            build_prompt(Action::MatchJob, RESUME, Some("  ")),
            Err(PromptError::MissingJobRole)
        );
    }

    #[test]
    fn test_job_role_ignored_for_other_actions() {
        let with_role = build_prompt(Action::AnalyzeResume, RESUME, Some("Chef")).unwrap();
        let without = build_prompt(Action::AnalyzeResume, RESUME, None).unwrap();
        assert_eq!(with_role, without);
    }

    #[test]
    fn test_placeholder_syntax_in_values_is_not_reexpanded() {
        let sneaky_resume = "Skills: {job_role} and {resume_text}";
        let prompt = build_prompt(Action::MatchJob, sneaky_resume, Some("{resume_text}")).unwrap();
        assert!(prompt.contains("job role \"{resume_text}\""));
        assert!(prompt.contains("Skills: {job_role} and {resume_text}"));
    }

    #[test]
    fn test_render_leaves_unknown_braces_alone() {
        assert_eq!(render("a {b} {c", &[("x", "y")]), "a {b} {c");
        assert_eq!(render("{x}{x}", &[("x", "y")]), "yy");
    }
}
