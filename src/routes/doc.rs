use utoipa::{
    Modify, OpenApi,
    openapi::{self, OpenApi as OpenApiSpec, server::Server},
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        cart::{AddToCartRequest, UpdateCartItemRequest},
        orders::{CheckoutRequest, OrderList, UpdateOrderStatusRequest},
        products::ProductList,
        seed::SeedReport,
        wishlist::Wishlist,
    },
    models::{Cart, CartLine, Category, Order, OrderStatus, Product, ShippingAddress, User, WishlistItem},
    response::{ApiResponse, Meta},
    routes::{cart, health, orders, params, products, seed, user, wishlist},
};

struct ServerAddon;

impl Modify for ServerAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        openapi.servers = Some(vec![Server::new("/")]);
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        seed::seed_database,
        products::list_products,
        products::search_products,
        products::get_product,
        cart::get_cart,
        cart::add_to_cart,
        cart::update_cart_item,
        cart::remove_from_cart,
        cart::clear_cart,
        orders::list_orders,
        orders::create_order,
        orders::get_order,
        orders::update_order_status,
        user::get_user,
        user::update_user,
        wishlist::list_wishlist,
        wishlist::add_to_wishlist,
        wishlist::remove_from_wishlist
    ),
    components(
        schemas(
            Product,
            Category,
            Cart,
            CartLine,
            Order,
            OrderStatus,
            ShippingAddress,
            User,
            WishlistItem,
            AddToCartRequest,
            UpdateCartItemRequest,
            CheckoutRequest,
            UpdateOrderStatusRequest,
            OrderList,
            ProductList,
            Wishlist,
            SeedReport,
            params::ProductSort,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<Cart>,
            ApiResponse<Order>,
            ApiResponse<OrderList>
        )
    ),
    modifiers(&ServerAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Seed", description = "Catalog seeding"),
        (name = "Products", description = "Catalog endpoints"),
        (name = "Cart", description = "Cart endpoints"),
        (name = "Orders", description = "Order endpoints"),
        (name = "User", description = "Demo user profile"),
        (name = "Wishlist", description = "Wishlist endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
