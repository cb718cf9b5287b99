//! Product command handlers.

use tabled::Tabled;

use scoopadmin_api::ResourceKind;
use scoopadmin_core::model::Product;
use scoopadmin_core::{Dispatcher, FormMode, ProductDraft, SubmitOutcome, submit};

use crate::cli::{GlobalOpts, ProductFormArgs, ProductsArgs, ProductsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Section")]
    section: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Stock")]
    stock: i64,
    #[tabled(rename = "Active")]
    active: bool,
}

impl From<&Product> for ProductRow {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            section: p.section.clone().unwrap_or_default(),
            price: format!("{:.2}", p.price),
            stock: p.stock,
            active: p.active,
        }
    }
}

fn detail(p: &Product, media_base: &str) -> String {
    let mut lines = vec![
        format!("ID:       {}", p.id),
        format!("Name:     {}", p.name),
        format!("Section:  {}", p.section.as_deref().unwrap_or("-")),
        format!("Price:    {:.2}", p.price),
        format!("Stock:    {}", p.stock),
        format!("Active:   {}", p.active),
        format!("Created:  {}", util::fmt_time(p.created_at.as_ref())),
    ];
    if let Some(ref description) = p.description {
        lines.push(format!("\n{description}"));
    }
    if !p.images.is_empty() {
        let urls: Vec<String> = p
            .images
            .iter()
            .map(|path| util::media_url(media_base, path))
            .collect();
        lines.push(format!("Images:   {}", urls.join(", ")));
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    dispatcher: &Dispatcher,
    args: ProductsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ProductsCommand::List(list_args) => {
            let mut ctl = util::controller_from_args(
                ResourceKind::Products,
                &list_args.list,
                global.default_limit,
            );
            if let Some(ref section) = list_args.section {
                ctl.set_filter("section", section.clone());
                ctl.set_page(list_args.list.page, None);
            }
            dispatcher
                .fetch_list(ResourceKind::Products, &ctl.query())
                .await?;

            let slice = dispatcher.store().products.list.get();
            let out = output::render_list(
                &global.output(),
                &slice.items,
                |p| ProductRow::from(p),
                |p| p.id.clone(),
            );
            output::print_output(&out, global.quiet);
            if let Some(ref pagination) = slice.pagination {
                output::print_range_footer(&global.output(), pagination, global.quiet);
            }
            Ok(())
        }

        ProductsCommand::Get { id } => {
            dispatcher.fetch_detail(ResourceKind::Products, &id).await?;
            let slice = dispatcher.store().products.detail.get();
            let product = slice.data.ok_or_else(|| CliError::NotFound {
                resource: "Product".into(),
                id,
                list_command: "products list".into(),
            })?;
            let out = output::render_single(
                &global.output(),
                &product,
                |p| detail(p, &global.media_base),
                |p| p.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProductsCommand::Create(form) => {
            let draft = draft_from_args(ProductDraft::default(), form)?;
            let outcome = submit(dispatcher, &draft, FormMode::Create).await?;
            if let SubmitOutcome::Created { id } = outcome {
                if !global.quiet {
                    eprintln!("Product created: {id}");
                }
            }
            Ok(())
        }

        ProductsCommand::Update { id, form } => {
            dispatcher.fetch_detail(ResourceKind::Products, &id).await?;
            let slice = dispatcher.store().products.detail.get();
            let product = slice.data.ok_or_else(|| CliError::NotFound {
                resource: "Product".into(),
                id: id.clone(),
                list_command: "products list".into(),
            })?;

            let draft = draft_from_args(ProductDraft::from_product(&product), form)?;
            submit(dispatcher, &draft, FormMode::Edit { id }).await?;
            if !global.quiet {
                eprintln!("Product updated");
            }
            Ok(())
        }

        ProductsCommand::Delete { id } => {
            if !util::confirm(&format!("Delete product {id}?"), global.yes)? {
                return Ok(());
            }
            dispatcher.delete(ResourceKind::Products, &id).await?;
            if !global.quiet {
                eprintln!("Product deleted");
            }
            Ok(())
        }
    }
}

fn draft_from_args(mut draft: ProductDraft, form: ProductFormArgs) -> Result<ProductDraft, CliError> {
    if let Some(name) = form.name {
        draft.name = name;
    }
    if let Some(description) = form.description {
        draft.description = description;
    }
    if let Some(price) = form.price {
        draft.price = price;
    }
    if let Some(stock) = form.stock {
        draft.stock = stock;
    }
    if let Some(section) = form.section {
        draft.section = section;
    }
    if let Some(active) = form.active {
        draft.active = active;
    }
    for path in &form.image {
        draft.images.push(util::load_attachment("images", path)?);
    }
    Ok(draft)
}
