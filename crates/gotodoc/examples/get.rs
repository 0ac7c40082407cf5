//! GET handler binding a path variable, a query parameter, a cookie and a
//! header.
//!
//! ```text
//! cargo run -p gotodoc --example get
//! curl -H 'head: h1' --cookie 'who=me' 'localhost:8080/test/12?search=lamp'
//! curl -i -X OPTIONS localhost:8080/test/12
//! ```

use gotodoc::prelude::*;

#[derive(Debug, Default, Serialize, Deserialize, RequestRecord)]
#[record(crate = "gotodoc::core")]
struct GetStructTest {
    #[param(path = "id")]
    id: String,
    #[param(query = "search", required = false)]
    search: String,
    #[param(cookie = "who", required = false)]
    who: String,
    #[param(header = "head", required = false)]
    head: String,
}

async fn get_test(ctx: RequestContext, req: GetStructTest) -> HandlerResult<()> {
    tracing::info!(request_id = %ctx.request_id(), id = %req.id, "handler with id");
    if req.id == "12" {
        tracing::info!("good value");
    }
    tracing::info!(search = %req.search, who = %req.who, head = %req.head, "bound values");
    Ok(None)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = ConfigLoader::new()
        .with_dotenv()?
        .with_env_prefix("GOTODOC")
        .load()?;
    config.docs.title = "API".to_string();
    config.docs.version = "0.0.1".to_string();
    config.docs.description = "API in swagger".to_string();

    gotodoc::init_logging(&config)?;

    let mut app = gotodoc::app_from_config(&config);
    app.register("/test/{id}", Method::GET, get_test)?;

    let mut table = RouteTable::new();
    app.serve_stdout(&mut table)?;

    HttpServer::new(gotodoc::server_config(&config), table).run().await?;
    Ok(())
}
