//! BDD step definitions for notification feature

use std::sync::Arc;

use cucumber::{given, then, when};

use homework_bot::config::TelegramConfig;
use homework_bot::notifier::notify_once;
use homework_bot::state::PollState;
use homework_bot::telegram::TelegramNotifier;

use crate::world::{BotWorld, INITIAL_TIMESTAMP};

fn test_telegram_config() -> TelegramConfig {
    TelegramConfig {
        api_url: "https://telegram.test".to_string(),
        token: "123:abc".to_string(),
        chat_id: "42".to_string(),
    }
}

#[given("a Telegram chat that accepts messages")]
async fn chat_accepts(world: &mut BotWorld) {
    *world.http.telegram_status.write().await = 200;
}

#[given("a Telegram chat that rejects messages")]
async fn chat_rejects(world: &mut BotWorld) {
    *world.http.telegram_status.write().await = 400;
}

#[when(regex = r#"^the message "(.*)" is sent once$"#)]
async fn send_once(world: &mut BotWorld, text: String) {
    let http = Arc::clone(&world.http);
    let notifier = world
        .notifier
        .get_or_insert_with(|| TelegramNotifier::new(&test_telegram_config(), http));
    let state = world
        .poll_state
        .get_or_insert_with(|| PollState::new(INITIAL_TIMESTAMP));

    match notify_once(&*notifier, &text, &*state).await {
        Ok(sent) => {
            state.last_sent_text = sent;
            world.delivery_result = Some(Ok(()));
        }
        Err(e) => world.delivery_result = Some(Err(e)),
    }
}

#[then("the delivery should fail")]
fn delivery_fails(world: &mut BotWorld) {
    let result = world.delivery_result.as_ref().expect("no result");
    assert!(result.is_err());
}

#[then(expr = "the chat should have received {int} message(s)")]
async fn chat_received(world: &mut BotWorld, count: usize) {
    assert_eq!(world.http.messages.read().await.len(), count);
}

#[then(regex = r#"^chat message (\d+) should be "(.*)"$"#)]
async fn chat_message_is(world: &mut BotWorld, index: usize, expected: String) {
    let messages = world.http.messages.read().await;
    assert_eq!(messages[index - 1], expected);
}

#[then(regex = r#"^chat message (\d+) should start with "(.*)"$"#)]
async fn chat_message_starts_with(world: &mut BotWorld, index: usize, prefix: String) {
    let messages = world.http.messages.read().await;
    assert!(
        messages[index - 1].starts_with(&prefix),
        "{:?}",
        messages[index - 1]
    );
}

#[then(regex = r#"^the last sent text should be "(.*)"$"#)]
fn last_sent_is(world: &mut BotWorld, expected: String) {
    let last_sent = match (&world.engine, &world.poll_state) {
        (Some(engine), _) => engine.state().last_sent_text.clone(),
        (None, Some(state)) => state.last_sent_text.clone(),
        (None, None) => String::new(),
    };
    assert_eq!(last_sent, expected);
}
