//! The fixed question table and canned content.

/// A hardcoded question the assistant can answer directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownQuestion {
    /// Lowercase trigger phrase matched as a substring of the input.
    pub key: &'static str,
    /// Short title shown on the quick-action button.
    pub title: &'static str,
    /// HTML-formatted answer.
    pub answer: &'static str,
    /// Loose intent keywords tied to this question.
    pub keywords: &'static [&'static str],
}

/// Opening lines shown the first time the widget is expanded.
pub const GREETING: [&str; 2] = [
    "Hi there 👋 I'm the OAX assistant.",
    "Pick one of the questions below, or type your own.",
];

pub const FALLBACK_APOLOGY: &str = "Sorry, I don't have a ready answer for that yet. \
     Here's a quick overview of what we do, and you can always book a free consultation \
     for anything else.";

pub const COMPANY_SUMMARY: &str = "<p><strong>OAX</strong> designs and builds websites, \
     web apps and mobile apps for growing businesses.</p>\
     <ul>\
     <li>Strategy and UX design</li>\
     <li>Web and mobile development</li>\
     <li>Launch, hosting and ongoing support</li>\
     </ul>\
     <p>Scroll down to the consultation form to tell us about your project.</p>";

static KNOWN_QUESTIONS: [KnownQuestion; 3] = [
    KnownQuestion {
        key: "what can you do for me",
        title: "What can you do for me?",
        answer: "<p>We turn ideas into working products:</p>\
             <ul>\
             <li><strong>Websites</strong> that load fast and convert visitors</li>\
             <li><strong>Web apps</strong> and dashboards for your team</li>\
             <li><strong>Mobile apps</strong> for iOS and Android</li>\
             </ul>\
             <p>Tell us what you have in mind and we'll suggest the right fit.</p>",
        keywords: &["what app"],
    },
    KnownQuestion {
        key: "how much will it cost",
        title: "How much will it cost?",
        answer: "<p>Every project is scoped individually, but most fall into one of our \
             packages:</p>\
             <ul>\
             <li><strong>Starter</strong>: a focused marketing site</li>\
             <li><strong>Growth</strong>: a larger site or a small web app</li>\
             <li><strong>Custom</strong>: full products, quoted after a call</li>\
             </ul>\
             <p>Pick a package in the consultation form for a tailored quote.</p>",
        keywords: &["cost", "how much"],
    },
    KnownQuestion {
        key: "how do i get started",
        title: "How do I get started?",
        answer: "<p>Getting started takes three steps:</p>\
             <ol>\
             <li>Fill in the consultation form with a few project details</li>\
             <li>We reply within one business day to book a call</li>\
             <li>You get a proposal with scope, timeline and price</li>\
             </ol>\
             <p>Prefer a person? Ask to talk to an expert in the form details.</p>",
        keywords: &["begin", "start", "talk to expert"],
    },
];

/// Returns the built-in question table in match order.
pub fn known_questions() -> &'static [KnownQuestion] {
    &KNOWN_QUESTIONS
}
