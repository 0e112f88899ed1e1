//! Minijinja template rendering for reminder messages.
//!
//! Each tone is a fixed template over the same [`MessageContext`] slots.
//! A fresh [`minijinja::Environment`] is created per render call and runs
//! with strict undefined handling, so a template referring to a slot that
//! does not exist fails instead of printing nothing.

use grump_core::Tone;

use crate::traits::NotifyError;

const DEFAULT_TEMPLATE: &str = "\
🤖 Reminder: {{ title }} has {{ missing_votes }} missing {{ 'vote' | plural(missing_votes) }}, and is ending in {{ days_left }}.
Missing votes in the last {{ threshold_days }} {{ 'day' | plural(threshold_days) }}:
{% for wallet in non_voters %}{{ wallet }}
{% endfor %}
Please cast your vote here asap: {{ link }}
Thank you!{% if dashboard_url %}

Full Details here:
{{ dashboard_url }}{% endif %}{% if mentions %}

cc {{ mentions | join(' ') }}{% endif %}";

const PLAYFUL_TEMPLATE: &str = "\
🚨 Hey team! {{ title }} needs some love! {{ missing_votes }} {{ 'vote' | plural(missing_votes) }} missing and it's ending in {{ days_left }}! ⏰
Who forgot to vote in the last {{ threshold_days }} {{ 'day' | plural(threshold_days) }}? 👀
{% for wallet in non_voters %}{{ wallet }}
{% endfor %}
🎯 Cast your vote NOW and be a hero: {{ link }}
Let's gooooo! 🚀{% if dashboard_url %}

Full Details here:
{{ dashboard_url }}{% endif %}{% if mentions %}

cc {{ mentions | join(' ') }}{% endif %}";

/// Data slots available to message templates.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MessageContext {
    /// Normalized proposal title (see `composer::format_title`).
    pub title: String,
    pub missing_votes: u32,
    /// `N day(s)` or `0 days (ENDED)`.
    pub days_left: String,
    pub threshold_days: i64,
    /// Canonical non-voter addresses in roster order.
    pub non_voters: Vec<String>,
    /// Call-to-action link to the proposal.
    pub link: String,
    pub dashboard_url: Option<String>,
    /// Pre-formatted mentions (`<@id>`); empty means no `cc` block.
    pub mentions: Vec<String>,
}

/// Renders reminder messages for a tone.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    default_template: String,
    playful_template: String,
}

impl TemplateRenderer {
    /// Create a renderer with the built-in templates.
    pub fn new() -> Self {
        Self {
            default_template: DEFAULT_TEMPLATE.to_string(),
            playful_template: PLAYFUL_TEMPLATE.to_string(),
        }
    }

    /// Create a renderer with custom templates. Both are syntax-checked here.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Template`] if either template fails to parse.
    pub fn with_templates(
        default_template: impl Into<String>,
        playful_template: impl Into<String>,
    ) -> Result<Self, NotifyError> {
        let renderer = Self {
            default_template: default_template.into(),
            playful_template: playful_template.into(),
        };
        renderer.validate(&renderer.default_template)?;
        renderer.validate(&renderer.playful_template)?;
        Ok(renderer)
    }

    /// Build a configured minijinja environment with custom filters.
    fn build_env() -> minijinja::Environment<'static> {
        let mut env = minijinja::Environment::new();
        env.set_undefined_behavior(minijinja::UndefinedBehavior::Strict);
        env.add_filter("plural", plural_filter);
        env
    }

    fn template_for(&self, tone: Tone) -> (&'static str, &str) {
        match tone {
            Tone::Default => ("reminder.txt", &self.default_template),
            Tone::Playful => ("reminder-playful.txt", &self.playful_template),
        }
    }

    /// Render the message for `tone`.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Template`] if the template is invalid or
    /// rendering fails.
    pub fn render(&self, tone: Tone, ctx: &MessageContext) -> Result<String, NotifyError> {
        let (name, source) = self.template_for(tone);
        Self::build_env()
            .render_named_str(name, source, ctx)
            .map_err(|e| NotifyError::Template(e.to_string()))
    }

    /// Validate that a template string parses without errors.
    pub fn validate(&self, template_str: &str) -> Result<(), NotifyError> {
        let env = Self::build_env();
        env.template_from_str(template_str)
            .map_err(|e| NotifyError::Template(e.to_string()))?;
        Ok(())
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// `noun` for a count of exactly one, `noun + "s"` for every other count.
pub fn pluralize(count: i64, noun: &str) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    }
}

/// Custom filter: `{{ 'vote' | plural(n) }}`.
fn plural_filter(noun: String, count: i64) -> String {
    pluralize(count, &noun)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_context() -> MessageContext {
        MessageContext {
            title: "GGP-0055 - \"Deploying token X\"".to_string(),
            missing_votes: 2,
            days_left: "3 days".to_string(),
            threshold_days: 5,
            non_voters: vec!["0xbbb".to_string(), "0xccc".to_string()],
            link: "https://snapshot.org/#/council.eth/proposal/0xp".to_string(),
            dashboard_url: None,
            mentions: Vec::new(),
        }
    }

    #[test]
    fn pluralize_counts() {
        assert_eq!(pluralize(1, "vote"), "vote");
        assert_eq!(pluralize(0, "vote"), "votes");
        assert_eq!(pluralize(2, "vote"), "votes");
        assert_eq!(pluralize(-1, "day"), "days");
    }

    #[test]
    fn render_default_tone() {
        let text = TemplateRenderer::new()
            .render(Tone::Default, &sample_context())
            .unwrap();
        assert_eq!(
            text,
            "🤖 Reminder: GGP-0055 - \"Deploying token X\" has 2 missing votes, and is ending in 3 days.\n\
             Missing votes in the last 5 days:\n\
             0xbbb\n\
             0xccc\n\
             \n\
             Please cast your vote here asap: https://snapshot.org/#/council.eth/proposal/0xp\n\
             Thank you!"
        );
    }

    #[test]
    fn render_playful_tone() {
        let text = TemplateRenderer::new()
            .render(Tone::Playful, &sample_context())
            .unwrap();
        assert!(text.starts_with("🚨 Hey team! GGP-0055 - \"Deploying token X\" needs some love! 2 votes missing"));
        assert!(text.contains("Who forgot to vote in the last 5 days? 👀\n0xbbb\n0xccc\n"));
        assert!(text.ends_with("Let's gooooo! 🚀"));
    }

    #[test]
    fn render_singular_vote() {
        let mut ctx = sample_context();
        ctx.missing_votes = 1;
        ctx.non_voters.truncate(1);
        let text = TemplateRenderer::new().render(Tone::Default, &ctx).unwrap();
        assert!(text.contains("has 1 missing vote, and"));
    }

    #[test]
    fn render_optional_blocks() {
        let mut ctx = sample_context();
        ctx.dashboard_url = Some("https://dash.example.com/grump/".to_string());
        ctx.mentions = vec!["<@U01>".to_string(), "<@U02>".to_string()];
        let text = TemplateRenderer::new().render(Tone::Default, &ctx).unwrap();
        assert!(text.ends_with(
            "Thank you!\n\nFull Details here:\nhttps://dash.example.com/grump/\n\ncc <@U01> <@U02>"
        ));
    }

    #[test]
    fn render_does_not_escape_quotes() {
        let text = TemplateRenderer::new()
            .render(Tone::Default, &sample_context())
            .unwrap();
        assert!(text.contains("\"Deploying token X\""));
    }

    #[test]
    fn custom_template_with_syntax_error_is_rejected() {
        let result = TemplateRenderer::with_templates("{{ unclosed", PLAYFUL_TEMPLATE);
        match result.unwrap_err() {
            NotifyError::Template(msg) => assert!(!msg.is_empty()),
            other => panic!("expected Template error, got: {other:?}"),
        }
    }

    #[test]
    fn undefined_slot_fails_at_render() {
        let renderer = TemplateRenderer::with_templates("{{ no_such_slot }}", PLAYFUL_TEMPLATE).unwrap();
        let result = renderer.render(Tone::Default, &sample_context());
        assert!(matches!(result, Err(NotifyError::Template(_))));
        // The other tone is unaffected.
        assert!(renderer.render(Tone::Playful, &sample_context()).is_ok());
    }
}
