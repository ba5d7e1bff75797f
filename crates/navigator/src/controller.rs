//! Transition from a decoded command to the next screen.
//!
//! No state survives between calls: every outgoing action is a [`Command`]
//! carried by the screen, so the next request can be interpreted from its
//! token alone.

use shared::{
    domain::{CategoryId, Product, SubcategoryId, PAGE_SIZE},
    error::NavError,
    protocol::{Intent, Notice},
    token::Command,
};
use tracing::debug;

use crate::repository::CatalogRepository;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub label: String,
    pub target: Command,
}

/// One page of a listing with its neighbouring pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub page: u32,
    pub entries: Vec<Entry>,
    pub previous: Option<Command>,
    pub next: Option<Command>,
}

impl Listing {
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetail {
    pub product: Product,
    pub index: i64,
    pub add_to_cart: Command,
    pub checkout: Command,
    pub previous: Command,
    pub next: Command,
    pub back: Command,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Categories(Listing),
    EmptyCatalog {
        retry: Command,
    },
    Subcategories {
        category_id: CategoryId,
        listing: Listing,
        back: Command,
    },
    NoSubcategories {
        category_id: CategoryId,
        back: Command,
    },
    /// A page past the end of a non-empty listing.
    NoMoreResults {
        previous: Command,
        back: Option<Command>,
    },
    Product(ProductDetail),
    ProductNotFound {
        back: Command,
    },
}

impl Screen {
    /// Every command reachable from this screen, in display order.
    pub fn outgoing(&self) -> Vec<Command> {
        match self {
            Self::Categories(listing) => listing_commands(listing),
            Self::EmptyCatalog { retry } => vec![*retry],
            Self::Subcategories { listing, back, .. } => {
                let mut commands = listing_commands(listing);
                commands.push(*back);
                commands
            }
            Self::NoSubcategories { back, .. } | Self::ProductNotFound { back } => vec![*back],
            Self::NoMoreResults { previous, back } => {
                std::iter::once(*previous).chain(*back).collect()
            }
            Self::Product(detail) => vec![
                detail.add_to_cart,
                detail.checkout,
                detail.previous,
                detail.next,
                detail.back,
            ],
        }
    }
}

fn listing_commands(listing: &Listing) -> Vec<Command> {
    listing
        .entries
        .iter()
        .map(|entry| entry.target)
        .chain(listing.previous)
        .chain(listing.next)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Screen(Screen),
    /// The current screen stays as it is.
    Notice(Notice),
    Intent(Intent),
}

pub struct Controller<R> {
    repository: R,
}

impl<R: CatalogRepository> Controller<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub async fn transition(&self, command: Command) -> Result<Outcome, NavError> {
        debug!(token = %command, "navigating");
        let outcome = match command {
            Command::ListCategories { page } => Outcome::Screen(self.categories(page).await?),
            Command::ListSubcategories { category_id, page } => {
                Outcome::Screen(self.subcategories(category_id, page).await?)
            }
            Command::ListProducts {
                subcategory_id,
                category_id,
            } => Outcome::Screen(self.product(subcategory_id, category_id, 1).await?),
            Command::ViewProduct {
                subcategory_id,
                category_id,
                index,
            } => self.step_product(subcategory_id, category_id, index).await?,
            Command::CartAdd { product_id } => Outcome::Intent(Intent::CartAdd { product_id }),
            Command::Checkout => Outcome::Intent(Intent::Checkout),
        };
        Ok(outcome)
    }

    async fn categories(&self, page: u32) -> Result<Screen, NavError> {
        let rows = self
            .repository
            .list_categories(PAGE_SIZE, page_offset(page))
            .await?;

        if rows.is_empty() {
            return Ok(match page.checked_sub(1).filter(|p| *p >= 1) {
                None => Screen::EmptyCatalog {
                    retry: Command::start(),
                },
                Some(previous) => Screen::NoMoreResults {
                    previous: Command::ListCategories { page: previous },
                    back: None,
                },
            });
        }

        let full_page = rows.len() == PAGE_SIZE as usize;
        let entries = rows
            .into_iter()
            .map(|category| Entry {
                target: Command::ListSubcategories {
                    category_id: category.id,
                    page: 1,
                },
                label: category.name,
            })
            .collect();
        Ok(Screen::Categories(paginate(page, entries, full_page, |page| {
            Command::ListCategories { page }
        })))
    }

    async fn subcategories(&self, category_id: CategoryId, page: u32) -> Result<Screen, NavError> {
        let rows = self
            .repository
            .list_subcategories(category_id, PAGE_SIZE, page_offset(page))
            .await?;
        let back = Command::start();

        if rows.is_empty() {
            return Ok(match page.checked_sub(1).filter(|p| *p >= 1) {
                None => Screen::NoSubcategories { category_id, back },
                Some(previous) => Screen::NoMoreResults {
                    previous: Command::ListSubcategories {
                        category_id,
                        page: previous,
                    },
                    back: Some(back),
                },
            });
        }

        let full_page = rows.len() == PAGE_SIZE as usize;
        let entries = rows
            .into_iter()
            .map(|subcategory| Entry {
                target: Command::ListProducts {
                    subcategory_id: subcategory.id,
                    category_id,
                },
                label: subcategory.name,
            })
            .collect();
        Ok(Screen::Subcategories {
            category_id,
            listing: paginate(page, entries, full_page, |page| Command::ListSubcategories {
                category_id,
                page,
            }),
            back,
        })
    }

    /// Bounds are checked against the product count first. The count is
    /// advisory: a miss on the fetch that follows still ends in
    /// [`Screen::ProductNotFound`].
    async fn step_product(
        &self,
        subcategory_id: SubcategoryId,
        category_id: CategoryId,
        index: i64,
    ) -> Result<Outcome, NavError> {
        let count = self.repository.count_products(subcategory_id).await?;
        if index < 1 {
            debug!(%subcategory_id, index, "stepped before the first product");
            return Ok(Outcome::Notice(Notice::FirstItem));
        }
        if index > count {
            debug!(%subcategory_id, index, count, "stepped past the last product");
            return Ok(Outcome::Notice(Notice::LastItem));
        }
        Ok(Outcome::Screen(
            self.product(subcategory_id, category_id, index).await?,
        ))
    }

    async fn product(
        &self,
        subcategory_id: SubcategoryId,
        category_id: CategoryId,
        index: i64,
    ) -> Result<Screen, NavError> {
        let back = Command::ListSubcategories {
            category_id,
            page: 1,
        };
        let Some(product) = self
            .repository
            .product_at(subcategory_id, index - 1)
            .await?
        else {
            debug!(%subcategory_id, index, "product not found");
            return Ok(Screen::ProductNotFound { back });
        };

        // neighbours are always offered; the next request checks the bounds
        let step = |index| Command::ViewProduct {
            subcategory_id,
            category_id,
            index,
        };
        Ok(Screen::Product(ProductDetail {
            add_to_cart: Command::CartAdd {
                product_id: product.id,
            },
            checkout: Command::Checkout,
            previous: step(index - 1),
            next: step(index.saturating_add(1)),
            back,
            index,
            product,
        }))
    }
}

fn page_offset(page: u32) -> i64 {
    (i64::from(page) - 1) * i64::from(PAGE_SIZE)
}

/// A full page is taken as a sign that another page exists. This can offer
/// a next page that turns out empty when the total is a multiple of the
/// page size.
fn paginate(
    page: u32,
    entries: Vec<Entry>,
    full_page: bool,
    to_page: impl Fn(u32) -> Command,
) -> Listing {
    let previous = (page > 1).then(|| to_page(page - 1));
    let next = if full_page {
        page.checked_add(1).map(&to_page)
    } else {
        None
    };
    Listing {
        page,
        entries,
        previous,
        next,
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
