use color_eyre::Result;
use dialoguer::{Input, Password, Select};

/// Prompt for a string value with optional default
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input_builder = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true);

    if let Some(default_value) = default {
        input_builder = input_builder.default(default_value.to_string());
    }

    input_builder
        .interact_text()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

/// Prompt for a secret (masked input)
pub fn prompt_password(prompt: &str) -> Result<String> {
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

/// Pick one entry from a list; `None` when the user escapes
pub fn prompt_select<T: ToString>(prompt: &str, items: &[T]) -> Result<Option<usize>> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact_opt()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read selection: {}", e))
}

/// Star rating 1-10; `None` when the user skips
pub fn prompt_rating(prompt: &str) -> Result<Option<u8>> {
    let choices: Vec<String> = (1..=10u8)
        .map(|n| format!("{:>2} {}", n, "⭐".repeat(n as usize)))
        .chain(std::iter::once("Skip".to_string()))
        .collect();

    Ok(prompt_select(prompt, &choices)?
        .filter(|&i| i < 10)
        .map(|i| i as u8 + 1))
}
