use std::fmt::Write;

use crate::parser::profile::{MenteeProfile, MentorProfile};

/// Builds the ranking instruction sent to the language model.
pub fn build_prompt(mentee: &MenteeProfile, mentors: &[MentorProfile]) -> String {
    let interests = mentee.interests.join(", ");

    let mut prompt = format!(
        "You are an expert mentorship matchmaker. \
         A mentee is interested in: {interests}. \
         Rank the mentors below from best to worst fit for this mentee. \
         For each mentor give a match score between 0 and 1 (1 is the best fit) \
         and a one-sentence reason.\n\nMentors:\n"
    );

    for (idx, mentor) in mentors.iter().enumerate() {
        // Infallible for String.
        let _ = writeln!(
            prompt,
            "{}. id={} | {}: {}",
            idx + 1,
            mentor.id,
            mentor.name,
            mentor.qualifications
        );
    }

    prompt.push_str(
        "\nRespond with JSON only: a list of objects with keys mentor_id, score and reason, \
         using the id given for each mentor. \
         Example: [{\"mentor_id\": \"...\", \"score\": 0.92, \"reason\": \"...\"}]",
    );

    prompt
}
