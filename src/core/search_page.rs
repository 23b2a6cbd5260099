use crate::domain::model::{
    CartAction, CartItem, Product, SearchQuery, SearchResponse, SortOrder, DEFAULT_MAX_PRICE,
};
use crate::domain::ports::{CartStore, Notifier, ProductSource};
use crate::utils::error::{Result, ShopError};

/// Number of placeholder cards shown while a search is in flight.
pub const SKELETON_LENGTH: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Pagination {
    pub page: u32,
    pub total_page: u32,
}

impl Pagination {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_page
    }

    pub fn label(&self) -> String {
        format!("{} of {}", self.page, self.total_page)
    }
}

/// What the page currently shows: a skeleton while a request is in
/// flight, otherwise the result grid. The pagination block is present
/// only when there is more than one page.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    Skeleton { length: usize },
    Grid {
        products: Vec<Product>,
        pagination: Option<Pagination>,
    },
}

#[derive(Debug)]
enum Results {
    Loading,
    Ready(SearchResponse),
}

/// Search page session: filter and page state, the category list, and the
/// install/discard bookkeeping for in-flight requests.
///
/// Every filter setter resets the results to the loading state and bumps
/// the state generation; a response installs only if its generation is
/// still current, so a response to a superseded request can never
/// overwrite newer state.
pub struct SearchPage<P, S, N>
where
    P: ProductSource,
    S: CartStore,
    N: Notifier,
{
    source: P,
    cart: S,
    notifier: N,
    search: String,
    sort: Option<SortOrder>,
    max_price: u32,
    category: Option<String>,
    page: u32,
    results: Results,
    categories: Vec<String>,
    generation: u64,
    request_seq: u64,
    notified_request: Option<u64>,
}

impl<P, S, N> SearchPage<P, S, N>
where
    P: ProductSource,
    S: CartStore,
    N: Notifier,
{
    pub fn new(source: P, cart: S, notifier: N) -> Self {
        Self {
            source,
            cart,
            notifier,
            search: String::new(),
            sort: None,
            max_price: DEFAULT_MAX_PRICE,
            category: None,
            page: 1,
            results: Results::Loading,
            categories: Vec::new(),
            generation: 0,
            request_seq: 0,
            notified_request: None,
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if self.search != search {
            self.search = search;
            self.invalidate_results();
        }
    }

    pub fn set_sort(&mut self, sort: Option<SortOrder>) {
        if self.sort != sort {
            self.sort = sort;
            self.invalidate_results();
        }
    }

    pub fn set_max_price(&mut self, max_price: u32) {
        if self.max_price != max_price {
            self.max_price = max_price;
            self.invalidate_results();
        }
    }

    pub fn set_category(&mut self, category: Option<String>) {
        if self.category != category {
            self.category = category;
            self.invalidate_results();
        }
    }

    pub fn set_page(&mut self, page: u32) {
        if page >= 1 && self.page != page {
            self.page = page;
            self.invalidate_results();
        }
    }

    pub fn next_page(&mut self) {
        if let Results::Ready(data) = &self.results {
            if self.page < data.total_page {
                self.page += 1;
                self.invalidate_results();
            }
        }
    }

    pub fn prev_page(&mut self) {
        if let Results::Ready(_) = &self.results {
            if self.page > 1 {
                self.page -= 1;
                self.invalidate_results();
            }
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn query(&self) -> SearchQuery {
        SearchQuery {
            search: self.search.clone(),
            page: self.page,
            price: Some(self.max_price),
            sort: self.sort,
            category: self.category.clone(),
        }
    }

    /// Fetches the category list for the filter sidebar.
    pub async fn load_categories(&mut self) -> Result<()> {
        let request = self.next_request();
        match self.source.list_categories().await {
            Ok(categories) => {
                self.categories = categories;
                Ok(())
            }
            Err(error) => {
                self.notify_failure(request, &error);
                Err(error)
            }
        }
    }

    /// Runs the search for the current filter state and installs the
    /// response unless the state moved on while the request was in flight.
    pub async fn refresh(&mut self) -> Result<()> {
        let generation = self.generation;
        let request = self.next_request();
        let query = self.query();
        tracing::debug!(page = query.page, "searching products");

        match self.source.search(&query).await {
            Ok(response) => {
                self.install(generation, response);
                Ok(())
            }
            Err(error) => {
                self.notify_failure(request, &error);
                Err(error)
            }
        }
    }

    /// The one branching business rule on this page: an item without
    /// stock never reaches the cart.
    pub fn add_to_cart(&self, item: CartItem) {
        if item.stock < 1 {
            self.notifier.error("Out of Stock");
            return;
        }
        self.cart.dispatch(CartAction::Add(item));
        self.notifier.success("Added to cart");
    }

    /// Pure render of the current state. Never fires notifications.
    pub fn view(&self) -> ResultsView {
        match &self.results {
            Results::Loading => ResultsView::Skeleton {
                length: SKELETON_LENGTH,
            },
            Results::Ready(data) => ResultsView::Grid {
                products: data.products.clone(),
                pagination: (data.total_page > 1).then(|| Pagination {
                    page: self.page,
                    total_page: data.total_page,
                }),
            },
        }
    }

    fn invalidate_results(&mut self) {
        self.results = Results::Loading;
        self.generation += 1;
    }

    fn install(&mut self, generation: u64, response: SearchResponse) {
        if generation == self.generation {
            self.results = Results::Ready(response);
        } else {
            tracing::debug!(
                stale = generation,
                current = self.generation,
                "discarding response of superseded request"
            );
        }
    }

    fn next_request(&mut self) -> u64 {
        self.request_seq += 1;
        self.request_seq
    }

    /// Notifies at most once per failed request, no matter how often the
    /// page is rendered afterwards.
    fn notify_failure(&mut self, request: u64, error: &ShopError) {
        if self.notified_request != Some(request) {
            self.notifier.error(&error.notification());
            self.notified_request = Some(request);
        }
    }
}
