//! Command handlers - the interactive loop and the one-shot commands.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use chat_core::{ChatSession, Matcher, MatcherConfig, Reply, TeachOutcome};
use knowledge_store::load_knowledge_base;

use crate::config::Config;

/// Input that ends the interactive loop, compared case-insensitively.
const QUIT_KEYWORD: &str = "quit";

fn matcher_for(config: &Config) -> Matcher {
    Matcher::new(MatcherConfig {
        cutoff: config.cutoff,
    })
}

/// Render a reply as the line printed under the bot's name.
fn render_reply(reply: &Reply) -> String {
    match reply {
        Reply::Answer { text } => text.clone(),
        Reply::TeachPrompt => {
            "I don't know the answer. Can you teach me? (type the answer, or 'skip')".to_string()
        }
        Reply::Learned => "Thank you, I learned a new response.".to_string(),
        Reply::Declined => "Alright, maybe next time.".to_string(),
    }
}

/// Run the interactive chat loop over stdin/stdout.
pub fn run_chat(config: &Config) -> Result<()> {
    let mut session = ChatSession::open(&config.knowledge_base, matcher_for(config))?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("{} is listening. Type 'quit' to leave.", config.bot_name);

    loop {
        print!("You: ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let input = line.trim();
        if input.is_empty() && !session.is_awaiting_answer() {
            continue;
        }
        if input.eq_ignore_ascii_case(QUIT_KEYWORD) {
            println!("{}: Goodbye!", config.bot_name);
            break;
        }

        let reply = session.process_input(input)?;
        println!("{}: {}", config.bot_name, render_reply(&reply));
    }

    Ok(())
}

/// Answer a single question and exit; never enters teach mode.
pub fn run_ask(config: &Config, question: &str) -> Result<()> {
    let base = load_knowledge_base(&config.knowledge_base)?;

    match matcher_for(config).find_best_match(question, &base) {
        Some(found) => println!("{}: {}", config.bot_name, found.response()),
        None => println!("{}: I don't know the answer yet.", config.bot_name),
    }

    Ok(())
}

/// Teach one question/answer pair without chatting.
pub fn run_teach(config: &Config, question: &str, answer: &str) -> Result<()> {
    let mut session = ChatSession::open(&config.knowledge_base, matcher_for(config))?;

    match session.teach(question, answer)? {
        TeachOutcome::Learned => {
            println!("{}: Thank you, I learned a new response.", config.bot_name)
        }
        TeachOutcome::Declined => {
            println!("{}: Nothing to learn from that answer.", config.bot_name)
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_reply_lines() {
        let answer = Reply::Answer {
            text: "hi there".to_string(),
        };
        assert_eq!(render_reply(&answer), "hi there");
        assert!(render_reply(&Reply::TeachPrompt).contains("teach me"));
        assert!(render_reply(&Reply::Learned).contains("learned"));
    }
}
