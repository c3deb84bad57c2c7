// Fixed text tables. Each table is an exhaustive match so a new variant
// fails to compile until its text is written.

use super::types::{Decision, Location};

const RENTER_LINE: &str = "If this is a rental, I'd like to document it early to prevent damage and avoid liability confusion.";

const STEPS_ESCALATE: &[&str] = &[
    "If safe, shut off the nearest water valve (sink/toilet/main) and move items away.",
    "If water is near outlets or the ceiling is bulging, avoid contact and escalate immediately.",
    "Take a quick photo/video (helps them respond faster).",
    "Notify landlord/maintenance/HOA now (use the message below).",
];

const STEPS_SUBMIT: &[&str] = &[
    "Take a photo/video (helps accuracy and documentation).",
    "Submit a maintenance request today.",
    "Keep a towel/bucket in place until serviced.",
];

const STEPS_MONITOR: &[&str] = &[
    "Take a photo now (timestamp).",
    "Re-check in 2-4 hours and again tomorrow.",
    "If it becomes active or danger signs appear, escalate.",
];

pub fn responsibility_hint(location: Location) -> &'static str {
    match location {
        Location::UnderSink => {
            "Often landlord/maintenance if it's supply/drain plumbing; if it's your appliance/fixture, it may be on you."
        }
        Location::Toilet => {
            "Often landlord/maintenance for supply/valve/base leaks; HOA may apply in condos depending on what's leaking."
        }
        Location::CeilingOrWall => {
            "Often an upstream source (unit above/common area), so landlord/HOA/management is usually responsible."
        }
        Location::Unknown => {
            "Varies. Management can determine responsibility once they see photos and location details."
        }
    }
}

pub fn location_phrase(location: Location) -> &'static str {
    match location {
        Location::UnderSink => "under the sink",
        Location::Toilet => "around the toilet",
        Location::CeilingOrWall => "on the ceiling/wall",
        Location::Unknown => "in my home (source unclear)",
    }
}

pub fn rationale(decision: Decision) -> &'static str {
    match decision {
        Decision::Escalate => {
            "High-risk signs mean it can worsen fast. Escalate now for safety and damage control."
        }
        Decision::Submit => {
            "Active leaks often get worse quietly. Reporting early prevents damage and blame later."
        }
        Decision::Monitor => "No active leak and no danger signs: monitor briefly, but document it.",
    }
}

pub fn next_steps(decision: Decision) -> &'static [&'static str] {
    match decision {
        Decision::Escalate => STEPS_ESCALATE,
        Decision::Submit => STEPS_SUBMIT,
        Decision::Monitor => STEPS_MONITOR,
    }
}

pub fn message_template(decision: Decision, location: Location) -> String {
    let place = location_phrase(location);
    match decision {
        Decision::Escalate => format!(
            "Hi, I have an active water leak {place} with higher-risk signs (possible spreading / safety concern). \
             Can someone assist ASAP? I can share photos/video and access details. {RENTER_LINE}"
        ),
        Decision::Submit => format!(
            "Hi, I noticed a water leak {place}. It's not an emergency, but I'm concerned about damage. \
             Can you advise next steps and schedule a repair? I can share photos/video. {RENTER_LINE}"
        ),
        Decision::Monitor => format!(
            "Hi, I noticed possible moisture/leak signs {place}. I'm monitoring it and can share a photo \
             for documentation. Please advise if you'd like me to submit a maintenance request."
        ),
    }
}

pub const DISCLAIMER: &str =
    "This is decision support, not repair instructions. If danger signs appear, escalate.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escalate_steps_in_safety_order() {
        let steps = next_steps(Decision::Escalate);
        assert_eq!(steps.len(), 4);
        assert!(steps[0].contains("shut off"));
        assert!(steps[1].contains("avoid contact"));
        assert!(steps[2].contains("photo/video"));
        assert!(steps[3].contains("Notify"));
    }

    #[test]
    fn test_submit_and_monitor_steps() {
        let submit = next_steps(Decision::Submit);
        assert!(submit[0].contains("photo/video"));
        assert!(submit[1].contains("today"));
        assert!(submit[2].contains("towel/bucket"));

        let monitor = next_steps(Decision::Monitor);
        assert!(monitor[0].contains("timestamp"));
        assert!(monitor[1].contains("2-4 hours"));
        assert!(monitor[2].contains("escalate"));
    }

    #[test]
    fn test_every_decision_has_its_own_copy() {
        for decision in Decision::ALL {
            assert!(!next_steps(decision).is_empty());
            assert!(!rationale(decision).is_empty());
            for other in Decision::ALL.into_iter().filter(|other| *other != decision) {
                assert_ne!(rationale(decision), rationale(other));
                assert_ne!(next_steps(decision), next_steps(other));
            }
        }
    }

    #[test]
    fn test_renter_line_only_on_escalate_and_submit() {
        for location in Location::ALL {
            assert!(message_template(Decision::Escalate, location).ends_with(RENTER_LINE));
            assert!(message_template(Decision::Submit, location).ends_with(RENTER_LINE));
            assert!(!message_template(Decision::Monitor, location).contains(RENTER_LINE));
        }
    }

    #[test]
    fn test_message_mentions_location() {
        let message = message_template(Decision::Submit, Location::Toilet);
        assert!(message.contains("around the toilet"));
        assert!(!message.contains("  "));
    }
}
