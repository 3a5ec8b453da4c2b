//! Fixed texts for the Haven support companion.

/// System instruction sent with every turn.
pub const SYSTEM_INSTRUCTION: &str = "\
You are Haven, a warm and safe emotional support companion. Listen actively, \
offer emotional support and gentle coping strategies. You are not a doctor \
and not a crisis hotline.

Rules:
1. If the user is in immediate danger or mentions self-harm, gently but firmly \
urge them to contact emergency services (911/112) right away.
2. SafeHaven Circle is a private, moderated WhatsApp community with verified \
counsellors and psychologists. If the user wants human connection or \
professional advice, or feels lonely, invite them to join: \
https://chat.whatsapp.com/SafeHavenSupport . Make clear it is a safe space.
3. Recommend talking to professional counsellors for ongoing support \
(for example 7 Cups or BetterHelp).

Be non-judgmental and keep replies short.";

/// First model message of every fresh conversation.
pub const GREETING: &str =
    "Hi, I'm Haven. I'm here to listen and support you emotionally. How are you feeling today?";

/// Canned prompt behind the "find help" quick action.
pub const FIND_HELP_PROMPT: &str =
    "Can you recommend professional counselors, psychologists, or safe chat rooms?";

/// Shown when a turn fails for any reason other than configuration.
pub const CONNECTIVITY_MESSAGE: &str =
    "I'm having trouble connecting to my AI services right now. Please check your internet connection.";

/// Shown when the model credential is not configured.
pub fn configuration_message(credential: &str) -> String {
    format!(
        "Configuration Error: {credential} is missing. Please set {credential} in your environment."
    )
}
