use anyhow::{Context, Result};
use locale_resolver::config::Config;
use locale_resolver::i18n::{
    BundleRegistry, FileStore, LanguageRegistry, LocaleResolver, NavigationContext, NoContext,
    TracingSink, UrlContext,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("locale_resolver=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;

    let bundles = BundleRegistry::from_dir(&config.bundle_dir).with_context(|| {
        format!(
            "Failed to read bundle directory {}",
            config.bundle_dir.display()
        )
    })?;
    info!("Found {} translation bundles", bundles.len());

    let resolver = LocaleResolver::new(
        LanguageRegistry::get().clone(),
        FileStore::new(&config.store_path),
        TracingSink,
        bundles,
    );

    let mut url_context = config.page_url.clone().map(UrlContext::new);
    let mut no_context = NoContext;
    let ctx: &mut dyn NavigationContext = match url_context.as_mut() {
        Some(ctx) => ctx,
        None => &mut no_context,
    };

    let selection = resolver
        .resolve_at_startup(ctx, config.preferred_tag.as_deref())
        .await?;

    println!("language:  {}", selection.language);
    println!("locale:    {}", selection.locale);
    println!("tag:       {}", selection.effective_tag());
    println!("direction: {}", resolver.direction());
    println!("bundle:    {}", resolver.bundle().id());

    if let Some(redirect) = url_context.as_ref().and_then(UrlContext::redirect) {
        println!("redirect:  {}", redirect);
    }

    for key in std::env::args().skip(1) {
        println!("{} = {}", key, resolver.translate(&key));
    }

    Ok(())
}
