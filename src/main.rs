use std::sync::Arc;

use oxide_thunk::app::{self, DemoConfig, Todo, UserApi};
use oxide_thunk::{StoreError, ThreadSpawner};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

fn main() -> Result<(), StoreError> {
    let config = DemoConfig::default();

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Err(err) = TermLogger::init(config.log_level, log_config, TerminalMode::Mixed, ColorChoice::Auto) {
        eprintln!("logging disabled: {err}");
    }

    let store = app::build_store(ThreadSpawner)?;

    let reader = store.clone();
    let subscription = store.subscribe(move || {
        let todos = app::select_todos(&reader.get_state()).unwrap_or_default();
        log::info!("Subscriber1: State updated: {:?}", todos.todos);
    });

    store.dispatch(app::add_todo(Todo::new(1, "Learn Redux")))?;
    store.dispatch(app::add_todo(Todo::new(2, "Build a project")))?;
    store.dispatch(app::remove_todo(1))?;

    let api: Arc<dyn UserApi> = Arc::new(config.simulated_api());
    let pending = store.dispatch(app::fetch_user(api, config.user_id))?;
    // Waiting only keeps the process alive; the fetch settles either way.
    futures::executor::block_on(pending.into_future());

    subscription.unsubscribe();
    log::info!("Unsubscribed!");

    if let Some(user) = app::select_user(&store.get_state()) {
        log::info!("Final user state: {user:?}");
    }

    Ok(())
}
