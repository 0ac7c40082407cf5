//! POST handler decoding a JSON body and answering with a number.
//!
//! ```text
//! GOTODOC_SERVER_HTTP_ADDR=127.0.0.1:1701 cargo run -p gotodoc --example post
//! curl -d '{"s":"text","i":3}' localhost:1701/test
//! ```

use gotodoc::prelude::*;

#[derive(Debug, Default, Serialize, Deserialize, RequestRecord)]
#[record(crate = "gotodoc::core")]
struct StructTest {
    #[param(body)]
    s: String,
    #[param(body)]
    i: i64,
}

async fn post_test(_ctx: RequestContext, req: StructTest) -> HandlerResult<i64> {
    tracing::info!(?req, "received");
    Ok(Some(1))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::new()
        .with_string(
            r#"
            [docs]
            title = "API"
            version = "0.0.1"
            description = "API in swagger"

            [logging]
            format = "pretty"
            "#,
            "toml",
        )?
        .with_env_prefix("GOTODOC")
        .load()?;

    gotodoc::init_logging(&config)?;

    let mut app = gotodoc::app_from_config(&config);
    app.post("/test", post_test)?;

    let mut table = RouteTable::new();
    app.serve_stdout(&mut table)?;

    HttpServer::new(gotodoc::server_config(&config), table).run().await?;
    Ok(())
}
