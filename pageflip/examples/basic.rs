use pageflip::{Orientation, PageBounds, PageHost, PageState, Pager, PagerOptions};

/// A host that only prints what the pager asks of it.
struct PrintHost {
    count: usize,
    viewport: PageBounds,
}

impl PageHost for PrintHost {
    fn item_count(&self) -> usize {
        self.count
    }

    fn viewport(&self) -> PageBounds {
        self.viewport
    }

    fn attach(&mut self, index: usize) -> bool {
        println!("  attach {index}");
        true
    }

    fn detach(&mut self, index: usize) {
        println!("  detach {index}");
    }

    fn layout_page(&mut self, _index: usize, _bounds: PageBounds) {}

    fn update_page(&mut self, state: PageState) {
        if state.visible {
            println!("  page {} visible at {}°", state.index, state.degree);
        }
    }

    fn request_layout(&mut self) {
        println!("  layout requested");
    }
}

fn main() {
    // Example: a vertical pager over 5 pages in a 200x300 viewport.
    //
    // Drag deltas go straight into `scroll_by`; the pager keeps the page nearest to the viewport
    // resting and reports how far it has turned.
    let mut host = PrintHost {
        count: 5,
        viewport: PageBounds::from_size_with_padding(200, 300, [0, 0, 0, 0]),
    };
    let opts = PagerOptions::new(Orientation::Vertical).with_on_page_change(Some(
        |old: usize, new: usize| println!("  page changed {old} -> {new}"),
    ));
    let mut pager = Pager::new(opts).expect("options are valid");

    println!("layout:");
    pager.layout(&mut host).expect("host supports vertical paging");

    for delta in [75, 75, 30, -200] {
        println!("scroll_by({delta}):");
        let consumed = pager.scroll_by(delta, &mut host).expect("pages draw raw");
        println!(
            "  consumed={consumed} page={} offset={} degree={}",
            pager.page(),
            pager.offset(),
            pager.geometry().degree()
        );
    }

    // Where an undisturbed settle would land, and how far it is.
    let target = pager.snap_page().unwrap_or(0);
    println!(
        "settle: page={target} distance={}",
        pager.distance_to_settle(target)
    );
}
