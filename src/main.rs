use pull_refresh::components::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
