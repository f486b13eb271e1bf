use agent_invoke::prelude::*;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), InvocationError> {
    let invoker = AgentInvoker::from_env()?;

    let result = invoker
        .run("Give me a one-paragraph summary of your knowledge base.")
        .await?;

    if result.completion == Completion::DeadlineExceeded {
        eprintln!("(reply truncated at deadline)");
    }
    println!("{}", result.text);
    Ok(())
}
