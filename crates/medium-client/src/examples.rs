use medium_types::Post;

/// A hard-coded article shipped with the client. Shown as permanent filler on
/// the feed and as the fallback when the server cannot serve a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExamplePost {
    pub id: i64,
    pub title: &'static str,
    pub tag: &'static str,
    pub author: &'static str,
    pub date: &'static str,
    pub image: &'static str,
    pub content: &'static str,
}

impl ExamplePost {
    pub fn to_post(&self) -> Post {
        Post {
            id: self.id,
            title: self.title.to_string(),
            content: self.content.to_string(),
            images: vec![self.image.to_string()],
            author: self.author.to_string(),
            created_at: self.date.to_string(),
        }
    }
}

pub fn example_post(id: i64) -> Option<&'static ExamplePost> {
    EXAMPLE_POSTS.iter().find(|p| p.id == id)
}

pub const RECOMMENDED_TAGS: [&str; 5] = ["React", "CSS", "TypeScript", "UX Design", "AI"];

pub static EXAMPLE_POSTS: [ExamplePost; 5] = [
    ExamplePost {
        id: 1,
        title: "Understanding React Context",
        tag: "React",
        author: "Jane Doe",
        date: "2025-07-17",
        image: "https://i.ytimg.com/vi/I-Q60UIpBrM/maxresdefault.jpg",
        content: r#"<h3><strong>Sharing state without threading props through every layer</strong></h3>
<p>Every growing React app reaches the point where a value needed three components down has to be handed through each parent on the way. Context removes that hand-off: a provider publishes a value and any descendant can read it directly.</p>
<p>Good candidates are values that many distant components care about:</p>
<ul>
  <li><strong>Themes:</strong> light and dark mode toggled from anywhere.</li>
  <li><strong>Preferences:</strong> language, font size, layout density.</li>
  <li><strong>Authentication:</strong> who is signed in and what they may see.</li>
</ul>
<p>Pair a context with <code>useReducer</code> and the provider becomes a small store: actions describe changes, the reducer applies them, and consumers re-render with the new state.</p>
<pre><code>function authReducer(state, action) {
  switch (action.type) {
    case 'LOGIN':
      return { ...state, user: action.payload };
    case 'LOGOUT':
      return { ...state, user: null };
    default:
      return state;
  }
}</code></pre>
<p>No extra dependency, and the data flow stays visible in the component tree.</p>"#,
    },
    ExamplePost {
        id: 2,
        title: "Intro to Tailwind CSS",
        tag: "CSS",
        author: "John Smith",
        date: "2025-07-16",
        image: "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcQvA00GaUwlwEKhXxDgarATH7yRlRh3utSexQ&s",
        content: r#"<p><strong>Utility classes instead of hand-named selectors</strong></p>
<p>A stylesheet usually starts tidy. A button gets padding, a hover colour, a border radius. A few months later the file is hundreds of lines of overrides nobody dares delete.</p>
<p>Tailwind takes a different route: small single-purpose classes applied directly in markup. It looks noisy at first, then the benefits show up.</p>
<ul>
  <li>Spacing and colour come from one scale, so designs stay consistent.</li>
  <li>Responsive variants such as <code>md:flex</code> live next to the element they change.</li>
  <li>Unused classes are purged, so the shipped CSS stays small.</li>
</ul>
<pre><code>&lt;button class="px-4 py-2 bg-indigo-600 text-white rounded hover:bg-indigo-700"&gt;
  Click me
&lt;/button&gt;</code></pre>
<p>The style is explicit and sits with the markup it affects.</p>"#,
    },
    ExamplePost {
        id: 3,
        title: "Why TypeScript is Taking Over JavaScript",
        tag: "TypeScript",
        author: "Alex Johnson",
        date: "2025-07-15",
        image: "https://cdn.thenewstack.io/media/2022/01/10b88c68-typescript-logo.png",
        content: r#"<p><strong>Static types as a note to your future self</strong></p>
<p>Code written late at night works until someone touches it three weeks later. Types record the assumptions that were in your head at the time.</p>
<ul>
  <li><strong>Errors before runtime:</strong> the compiler catches a missing field before a user does.</li>
  <li><strong>Signatures as documentation:</strong> a function's contract is visible where it is called.</li>
  <li><strong>Safer refactors:</strong> renames and interface changes are checked across the codebase.</li>
</ul>
<pre><code>function greet(name: string): string {
  return "Hello, " + name.toUpperCase();
}</code></pre>
<p>The annotation costs a few characters and buys editor completion and a class of bugs that can no longer ship.</p>"#,
    },
    ExamplePost {
        id: 4,
        title: "10 UX Laws Every Developer Should Know",
        tag: "UX Design",
        author: "Maria Devlin",
        date: "2025-07-14",
        image: "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcT5iEUTZ_sPEYn9KiWrHPjz9i7c80WrbXoSgw&s",
        content: r#"<p><strong>Design is how it works, not only how it looks</strong></p>
<p>A feature can be complete and still go unused. Often the reason is a well-known pattern of human behaviour the interface ignored.</p>
<ul>
  <li><strong>Hick's Law:</strong> more choices mean slower decisions.</li>
  <li><strong>Fitts's Law:</strong> large, nearby targets are faster to hit.</li>
  <li><strong>Jakob's Law:</strong> people expect your site to work like the others they use.</li>
</ul>
<p>Add proximity, common region, and the serial position effect, and most layout debates have an answer grounded in how people actually read a screen.</p>
<blockquote><p>You do not need to be a designer, but you do need to care about the experience.</p></blockquote>"#,
    },
    ExamplePost {
        id: 5,
        title: "How AI Is Changing Frontend Development",
        tag: "AI",
        author: "Jamie Synth",
        date: "2025-07-13",
        image: "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcS3L3BAyaO26EaWy_JvjzJLv2CS9Bnep_vEYxJJ8MS4bZQUOknuywFDjts_RFc-c8l2HmA&usqp=CAU",
        content: r#"<p><strong>Your next pair programmer may not be human</strong></p>
<p>A responsive navbar used to take half an hour. Now an assistant drafts the markup and styles from a one-line request, and the work shifts to reviewing and adjusting.</p>
<ul>
  <li>Completion tools write routine code as you type.</li>
  <li>Chat assistants explain unfamiliar legacy modules.</li>
  <li>Design-to-code tools turn mockups into component skeletons.</li>
</ul>
<p>What goes away is the busywork. What remains is deciding what to build, checking that it is right, and shaping the product around real users.</p>"#,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_findable() {
        for post in &EXAMPLE_POSTS {
            assert_eq!(example_post(post.id), Some(post));
        }
        assert_eq!(example_post(6), None);
    }

    #[test]
    fn to_post_uses_cover_image() {
        let post = EXAMPLE_POSTS[0].to_post();
        assert_eq!(post.images, vec![EXAMPLE_POSTS[0].image.to_string()]);
        assert_eq!(post.created_at, "2025-07-17");
    }
}
