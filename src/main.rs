use std::io::{self, BufRead, Write};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use violet_store::{
    app::App,
    config::AppConfig,
    events::AppEvent,
    format::money,
    models::Product,
    navigation::View,
};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,violet_store=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    let mut app = App::new(&config)?;

    // Badge counter and order confirmations react to broadcasts, not to
    // polling.
    app.events().subscribe(|event| match event {
        AppEvent::CartUpdated { total_items, total } => {
            println!("  [cart: {} item(s), total {}]", total_items, money(*total));
        }
        AppEvent::OrderCreated { order_id, total } => {
            println!("  [order #{} created, total {}]", order_id, money(*total));
        }
        AppEvent::UserLoggedIn { email } => println!("  [signed in as {email}]"),
        AppEvent::UserLoggedOut => println!("  [signed out]"),
        AppEvent::ViewChanged { .. } => {}
    });

    println!("Welcome to VioletStore! Type `help` for commands.");
    app.navigate(View::Home);
    render(&app);

    let stdin = io::stdin();
    loop {
        print!("violetstore> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = parts.split_first() else {
            continue;
        };
        match command {
            "help" => help(),
            "list" => {
                // Leading `+` marks a certification filter, the rest is
                // the search term: `list serum +Vegan +Organic`.
                let (filters, words): (Vec<&str>, Vec<&str>) =
                    args.iter().copied().partition(|a| a.starts_with('+'));
                let filters: Vec<String> = filters.iter().map(|f| f[1..].to_string()).collect();
                let term = words.join(" ");
                for product in app.catalog.search(&term, &filters) {
                    print_product_row(&product);
                }
            }
            "certs" => {
                for certification in app.catalog.certifications() {
                    println!("  {certification}");
                }
            }
            "show" => match parse_id(args.first()) {
                Some(id) => match app.catalog.find_by_id(id) {
                    Some(product) => print_product_detail(&product),
                    None => println!("no product with id {id}"),
                },
                None => println!("usage: show <id>"),
            },
            "add" => match parse_id(args.first()) {
                Some(id) => {
                    let quantity = args.get(1).and_then(|q| q.parse().ok()).unwrap_or(1);
                    app.add_to_cart(id, quantity);
                }
                None => println!("usage: add <id> [qty]"),
            },
            "inc" | "dec" | "rm" => match parse_id(args.first()) {
                Some(id) => {
                    match command {
                        "inc" => app.cart.increment_quantity(id),
                        "dec" => app.cart.decrement_quantity(id),
                        _ => app.cart.remove_product(id),
                    }
                    render_cart(&app);
                }
                None => println!("usage: {command} <id>"),
            },
            "qty" => match (parse_id(args.first()), args.get(1).and_then(|q| q.parse().ok())) {
                (Some(id), Some(quantity)) => {
                    app.cart.update_quantity(id, quantity);
                    render_cart(&app);
                }
                _ => println!("usage: qty <id> <quantity>"),
            },
            "cart" => {
                app.navigate(View::Cart);
                render(&app);
            }
            "discount" => {
                app.apply_discount(&args.join(" "));
                render_cart(&app);
            }
            "nodiscount" => {
                app.cart.remove_discount();
                render_cart(&app);
            }
            "checkout" => {
                if let Err(err) = app.process_checkout() {
                    println!("checkout failed: {err}");
                }
                render(&app);
            }
            "register" => match (args.first(), args.get(1)) {
                (Some(email), Some(password)) => {
                    let name = if args.len() > 2 { args[2..].join(" ") } else { "Customer".into() };
                    match app.auth.register(&name, email, password) {
                        Ok(user) => println!("registered {} (referral {})", user.email, user.referral_code),
                        Err(err) => println!("register failed: {err}"),
                    }
                }
                _ => println!("usage: register <email> <password> [name...]"),
            },
            "login" => match (args.first(), args.get(1)) {
                (Some(email), Some(password)) => match app.auth.login(email, password) {
                    Ok(user) => {
                        println!("welcome back, {}!", user.short_name());
                        app.navigate(View::Home);
                        render(&app);
                    }
                    Err(err) => println!("login failed: {err}"),
                },
                _ => println!("usage: login <email> <password>"),
            },
            "logout" => {
                app.auth.logout();
                app.navigate(View::Home);
            }
            "go" => match args.first().map(|v| v.parse::<View>()) {
                Some(Ok(view)) => {
                    app.navigate(view);
                    render(&app);
                }
                Some(Err(err)) => tracing::warn!("{err}"),
                None => println!("usage: go <home|cart|login|profile|blog|advisor>"),
            },
            "back" => {
                app.nav.go_back();
                render(&app);
            }
            "orders" => {
                app.navigate(View::Profile);
                render(&app);
            }
            "quit" | "exit" => break,
            other => println!("unknown command `{other}`; try `help`"),
        }
    }

    Ok(())
}

fn help() {
    println!(
        "commands:\n  \
         list [term] [+cert..]      search and filter the catalog\n  \
         certs                      list known certifications\n  \
         show <id>                  product detail\n  \
         add <id> [qty]             add to cart\n  \
         cart                       open the cart view\n  \
         inc|dec|rm <id>            adjust a cart line\n  \
         qty <id> <n>               set a line quantity (0 removes)\n  \
         discount <code>            apply a discount code\n  \
         nodiscount                 remove the discount\n  \
         checkout                   place the order\n  \
         register <email> <pw> [name]\n  \
         login <email> <pw> / logout\n  \
         go <view> / back / orders\n  \
         quit"
    );
}

fn parse_id(arg: Option<&&str>) -> Option<i64> {
    arg.and_then(|a| a.parse().ok())
}

/// Renders the current view, the terminal stand-in for the per-view
/// templates.
fn render(app: &App) {
    println!("-- {} --", app.nav.current_view());
    match app.nav.current_view() {
        View::Home => {
            for product in app.catalog.all() {
                print_product_row(&product);
            }
        }
        View::Cart => render_cart(app),
        View::Login => println!("use `login <email> <password>` or `register <email> <password> [name]`"),
        View::Profile => render_profile(app),
        View::Blog => println!("blog posts are published on the website"),
        View::Advisor => println!("leave a message and an advisor will contact you"),
    }
}

fn render_cart(app: &App) {
    if app.cart.is_empty() {
        println!("your cart is empty");
        return;
    }
    for line in app.cart.items() {
        println!(
            "  #{:<4} {:<28} x{:<3} {}",
            line.product.id,
            line.product.name,
            line.quantity,
            money(line.product.price * i64::from(line.quantity)),
        );
    }
    println!("  subtotal {}", money(app.cart.subtotal()));
    if let Some(code) = app.cart.cart().discount_code() {
        println!("  discount ({code}) -{}", money(app.cart.discount_amount()));
    }
    println!("  total    {}", money(app.cart.total()));
}

fn render_profile(app: &App) {
    let Some(user) = app.auth.current_user() else {
        return;
    };
    println!(
        "[{}] {} <{}> (referral {})",
        user.initials(),
        user.name,
        user.email,
        user.referral_code
    );
    let orders = app.orders_for_current_user();
    if orders.is_empty() {
        println!("no orders yet");
    }
    for order in orders {
        println!(
            "  order #{} [{}] {} item(s), total {}",
            order.id,
            order.status,
            order.total_items(),
            money(order.total),
        );
    }
}

fn print_product_row(product: &Product) {
    let stock = if !product.is_in_stock() {
        "out of stock".to_string()
    } else if product.is_low_stock() {
        format!("only {} left", product.stock)
    } else {
        format!("{} in stock", product.stock)
    };
    println!(
        "  #{:<4} {:<28} {:>10}  ({stock})",
        product.id,
        product.name,
        money(product.price),
    );
}

fn print_product_detail(product: &Product) {
    print_product_row(product);
    if let Some(description) = &product.description {
        println!("  {description}");
    }
    if !product.ingredients.is_empty() {
        println!("  ingredients: {}", product.ingredients.join(", "));
    }
    if !product.certifications.is_empty() {
        println!("  certifications: {}", product.certifications.join(", "));
    }
}
